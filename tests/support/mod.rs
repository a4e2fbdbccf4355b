// Byte-level builder for shortcut images used by the integration tests.
#![allow(dead_code)]

use lnkread::shelllink::LinkFlags;
use lnkread::shelllink::header::{HEADER_SIZE, LINK_CLSID};

pub const ENVIRONMENT_SIGNATURE: u32 = 0xA000_0001;

#[derive(Default)]
pub struct LnkBuilder {
    flags: LinkFlags,
    id_list: Option<Vec<u8>>,
    link_info: Option<Vec<u8>>,
    name: Option<String>,
    relative_path: Option<String>,
    working_dir: Option<String>,
    arguments: Option<String>,
    icon_location: Option<String>,
    blocks: Vec<Vec<u8>>,
    trailer: Vec<u8>,
}

impl LnkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unicode(mut self) -> Self {
        self.flags |= LinkFlags::IS_UNICODE;
        self
    }

    pub fn flags(mut self, flags: LinkFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn id_list(mut self, bytes: &[u8]) -> Self {
        self.flags |= LinkFlags::HAS_LINK_TARGET_ID_LIST;
        self.id_list = Some(bytes.to_vec());
        self
    }

    /// LinkInfo with a 36-byte header and the two Unicode strings.
    pub fn link_info_extended(mut self, local_base_path: &str, common_path_suffix: &str) -> Self {
        let local = utf16z(local_base_path);
        let suffix = utf16z(common_path_suffix);
        let local_off = 0x24u32;
        let suffix_off = local_off + local.len() as u32;
        let total = suffix_off + suffix.len() as u32;

        let mut b = Vec::new();
        b.extend(total.to_le_bytes());
        b.extend(0x24u32.to_le_bytes());
        b.extend(1u32.to_le_bytes());
        b.extend([0u8; 16]);
        b.extend(local_off.to_le_bytes());
        b.extend(suffix_off.to_le_bytes());
        b.extend(local);
        b.extend(suffix);
        self.flags |= LinkFlags::HAS_LINK_INFO;
        self.link_info = Some(b);
        self
    }

    /// LinkInfo with a 28-byte header and an ANSI local base path.
    pub fn link_info_base(mut self, local_base_path: &str) -> Self {
        let mut path = local_base_path.as_bytes().to_vec();
        path.push(0);
        let total = 0x1C + path.len() as u32;
        let mut b = Vec::new();
        b.extend(total.to_le_bytes());
        b.extend(0x1Cu32.to_le_bytes());
        b.extend(1u32.to_le_bytes());
        b.extend(0u32.to_le_bytes());
        b.extend(0x1Cu32.to_le_bytes());
        b.extend(0u32.to_le_bytes());
        b.extend(0u32.to_le_bytes());
        b.extend(path);
        self.flags |= LinkFlags::HAS_LINK_INFO;
        self.link_info = Some(b);
        self
    }

    pub fn name(mut self, s: &str) -> Self {
        self.flags |= LinkFlags::HAS_NAME;
        self.name = Some(s.into());
        self
    }

    pub fn relative_path(mut self, s: &str) -> Self {
        self.flags |= LinkFlags::HAS_RELATIVE_PATH;
        self.relative_path = Some(s.into());
        self
    }

    pub fn working_dir(mut self, s: &str) -> Self {
        self.flags |= LinkFlags::HAS_WORKING_DIR;
        self.working_dir = Some(s.into());
        self
    }

    pub fn arguments(mut self, s: &str) -> Self {
        self.flags |= LinkFlags::HAS_ARGUMENTS;
        self.arguments = Some(s.into());
        self
    }

    pub fn icon_location(mut self, s: &str) -> Self {
        self.flags |= LinkFlags::HAS_ICON_LOCATION;
        self.icon_location = Some(s.into());
        self
    }

    pub fn block(mut self, signature: u32, payload: &[u8]) -> Self {
        let mut b = (payload.len() as u32 + 8).to_le_bytes().to_vec();
        b.extend(signature.to_le_bytes());
        b.extend_from_slice(payload);
        self.blocks.push(b);
        self
    }

    pub fn environment_block(self, target: &str) -> Self {
        let mut payload = vec![0u8; 260];
        let ansi = target.as_bytes();
        payload[..ansi.len()].copy_from_slice(ansi);
        let mut unicode: Vec<u8> = target.encode_utf16().flat_map(u16::to_le_bytes).collect();
        unicode.resize(520, 0);
        payload.extend(unicode);
        self.block(ENVIRONMENT_SIGNATURE, &payload)
    }

    /// Bytes appended after the terminal block.
    pub fn trailer(mut self, bytes: &[u8]) -> Self {
        self.trailer = bytes.to_vec();
        self
    }

    /// Full image: sections, terminal block, then any trailer bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut out = self.build_without_terminal();
        out.extend(0u32.to_le_bytes());
        out.extend(&self.trailer);
        out
    }

    pub fn build_without_terminal(&self) -> Vec<u8> {
        let mut out = (HEADER_SIZE as i32).to_le_bytes().to_vec();
        out.extend(LINK_CLSID);
        out.extend(self.flags.bits().to_le_bytes());
        out.resize(HEADER_SIZE, 0);

        if let Some(id_list) = &self.id_list {
            out.extend((id_list.len() as u16).to_le_bytes());
            out.extend(id_list);
        }
        if let Some(info) = &self.link_info {
            out.extend(info);
        }
        let unicode = self.flags.contains(LinkFlags::IS_UNICODE);
        for s in [
            &self.name,
            &self.relative_path,
            &self.working_dir,
            &self.arguments,
            &self.icon_location,
        ]
        .into_iter()
        .flatten()
        {
            out.extend(counted_string(s, unicode));
        }
        for b in &self.blocks {
            out.extend(b);
        }
        out
    }
}

/// Character-count-prefixed string as written in StringData.
pub fn counted_string(s: &str, unicode: bool) -> Vec<u8> {
    if unicode {
        let units: Vec<u16> = s.encode_utf16().collect();
        let mut v = (units.len() as u16).to_le_bytes().to_vec();
        v.extend(units.iter().flat_map(|u| u.to_le_bytes()));
        v
    } else {
        let mut v = (s.len() as u16).to_le_bytes().to_vec();
        v.extend_from_slice(s.as_bytes());
        v
    }
}

pub fn utf16z(s: &str) -> Vec<u8> {
    let mut v: Vec<u8> = s.encode_utf16().flat_map(u16::to_le_bytes).collect();
    v.extend([0, 0]);
    v
}
