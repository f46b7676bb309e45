//! Static mapping from lump names to the codec that understands them.
//!
//! Map and texture lumps are dispatched by their exact name through [`lookup`].
//! Flats and sprites have free-form names and are recognised by the marker section
//! they sit in; the archive resolves those before calling [`LumpKind::decode`].

use crate::error::WadError;
use crate::ext::io_ext::NAME_WIDTH;
use crate::lumps::blockmap::{self, Blockmap};
use crate::lumps::fixed_record::{decode_records, encode_records, FixedRecord};
use crate::lumps::flat::{self, Flat, FLAT_SIZE};
use crate::lumps::linedef::{self, Linedef};
use crate::lumps::node::{self, Node};
use crate::lumps::sector::{self, Sector};
use crate::lumps::seg::{self, Seg};
use crate::lumps::sidedef::{self, Sidedef};
use crate::lumps::sprite::{self, Sprite};
use crate::lumps::subsector::{self, Subsector};
use crate::lumps::thing::{self, Thing};
use crate::lumps::vertex::{self, Vertex};
use crate::lumps::{patch_names, reject, texture};
use std::fmt;

/// How the payload length of a lump kind is constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// Back-to-back records of this many bytes.
    Fixed(usize),
    /// A header of at least this many bytes followed by variable data.
    HeaderPrefixed { min: usize },
    /// Exactly this many bytes.
    Exact(usize),
    /// Any length.
    Opaque,
}

/// Every lump format this crate can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LumpKind {
    Things,
    Vertexes,
    Linedefs,
    Sidedefs,
    Sectors,
    Segs,
    Subsectors,
    Nodes,
    Reject,
    Blockmap,
    PatchNames,
    Textures,
    Flat,
    Sprite,
}

/// Options that change how strictly lumps are decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Check sprite pixel buffers against their declared dimensions.
    pub strict_sprites: bool,
}

/// Lump names dispatched directly to a codec.
pub const NAMED_LUMPS: &[(&str, LumpKind)] = &[
    ("THINGS", LumpKind::Things),
    ("VERTEXES", LumpKind::Vertexes),
    ("LINEDEFS", LumpKind::Linedefs),
    ("SIDEDEFS", LumpKind::Sidedefs),
    ("SECTORS", LumpKind::Sectors),
    ("SEGS", LumpKind::Segs),
    ("SSECTORS", LumpKind::Subsectors),
    ("NODES", LumpKind::Nodes),
    ("REJECT", LumpKind::Reject),
    ("BLOCKMAP", LumpKind::Blockmap),
    ("PNAMES", LumpKind::PatchNames),
    ("TEXTURE1", LumpKind::Textures),
    ("TEXTURE2", LumpKind::Textures),
];

const fn same_name(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn sizing_is_valid(sizing: Sizing) -> bool {
    match sizing {
        Sizing::Fixed(size) => size > 0,
        Sizing::HeaderPrefixed { min } => min > 0,
        Sizing::Exact(size) => size > 0,
        Sizing::Opaque => true,
    }
}

const fn table_is_valid(table: &[(&str, LumpKind)]) -> bool {
    let mut i = 0;
    while i < table.len() {
        let name = table[i].0;
        if name.is_empty() || name.len() > NAME_WIDTH {
            return false;
        }
        if !sizing_is_valid(table[i].1.sizing()) {
            return false;
        }
        let mut j = i + 1;
        while j < table.len() {
            if same_name(name, table[j].0) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    table_is_valid(NAMED_LUMPS),
    "registered lump names must be unique, fit a directory entry and have a usable size rule"
);

const _: () = assert!(
    sizing_is_valid(LumpKind::Flat.sizing()) && sizing_is_valid(LumpKind::Sprite.sizing()),
    "section lump kinds need a usable size rule"
);

/// Returns the codec registered for an exact, case-sensitive lump name.
pub fn lookup(name: &str) -> Option<LumpKind> {
    NAMED_LUMPS
        .iter()
        .find(|(registered, _)| *registered == name)
        .map(|(_, kind)| *kind)
}

impl LumpKind {
    /// Human readable kind name.
    pub fn name(self) -> &'static str {
        match self {
            LumpKind::Things => "Thing",
            LumpKind::Vertexes => "Vertex",
            LumpKind::Linedefs => "Linedef",
            LumpKind::Sidedefs => "Sidedef",
            LumpKind::Sectors => "Sector",
            LumpKind::Segs => "Seg",
            LumpKind::Subsectors => "Subsector",
            LumpKind::Nodes => "Node",
            LumpKind::Reject => "Reject",
            LumpKind::Blockmap => "Blockmap",
            LumpKind::PatchNames => "PatchNameTable",
            LumpKind::Textures => "TextureTable",
            LumpKind::Flat => "Flat",
            LumpKind::Sprite => "Sprite",
        }
    }

    /// Length rule every payload of this kind must satisfy.
    pub const fn sizing(self) -> Sizing {
        match self {
            LumpKind::Things => Sizing::Fixed(Thing::SIZE),
            LumpKind::Vertexes => Sizing::Fixed(Vertex::SIZE),
            LumpKind::Linedefs => Sizing::Fixed(Linedef::SIZE),
            LumpKind::Sidedefs => Sizing::Fixed(Sidedef::SIZE),
            LumpKind::Sectors => Sizing::Fixed(Sector::SIZE),
            LumpKind::Segs => Sizing::Fixed(Seg::SIZE),
            LumpKind::Subsectors => Sizing::Fixed(Subsector::SIZE),
            LumpKind::Nodes => Sizing::Fixed(Node::SIZE),
            LumpKind::Reject => Sizing::Opaque,
            LumpKind::Blockmap => Sizing::HeaderPrefixed {
                min: blockmap::HEADER_SIZE,
            },
            LumpKind::PatchNames | LumpKind::Textures => Sizing::HeaderPrefixed { min: 4 },
            LumpKind::Flat => Sizing::Exact(FLAT_SIZE),
            LumpKind::Sprite => Sizing::HeaderPrefixed {
                min: sprite::HEADER_SIZE,
            },
        }
    }

    /// Checks a payload length against [`LumpKind::sizing`].
    pub fn check_size(self, len: usize) -> Result<(), WadError> {
        let problem = match self.sizing() {
            Sizing::Fixed(size) if len % size != 0 => {
                format!("size {len} is not a multiple of {size}")
            }
            Sizing::HeaderPrefixed { min } if len < min => {
                format!("size {len} is smaller than its {min}-byte header")
            }
            Sizing::Exact(size) if len != size => format!("size {len} is not {size}"),
            _ => return Ok(()),
        };
        Err(WadError::format(format!("{self} lump {problem}")))
    }

    /// Decodes `bytes` as this kind after checking the payload length.
    pub fn decode(self, bytes: &[u8], options: DecodeOptions) -> Result<LumpData, WadError> {
        self.check_size(bytes.len())?;
        Ok(match self {
            LumpKind::Things => LumpData::Things(decode_records(bytes)?),
            LumpKind::Vertexes => LumpData::Vertexes(decode_records(bytes)?),
            LumpKind::Linedefs => LumpData::Linedefs(decode_records(bytes)?),
            LumpKind::Sidedefs => LumpData::Sidedefs(decode_records(bytes)?),
            LumpKind::Sectors => LumpData::Sectors(decode_records(bytes)?),
            LumpKind::Segs => LumpData::Segs(decode_records(bytes)?),
            LumpKind::Subsectors => LumpData::Subsectors(decode_records(bytes)?),
            LumpKind::Nodes => LumpData::Nodes(decode_records(bytes)?),
            LumpKind::Reject => LumpData::Reject(reject::decode(bytes)),
            LumpKind::Blockmap => LumpData::Blockmap(Blockmap::decode(bytes)?),
            LumpKind::PatchNames => LumpData::PatchNames(patch_names::decode(bytes)?),
            LumpKind::Textures => LumpData::Textures(texture::decode(bytes)?),
            LumpKind::Flat => LumpData::Flat(Flat::decode(bytes)?),
            LumpKind::Sprite if options.strict_sprites => {
                LumpData::Sprite(Sprite::decode_strict(bytes)?)
            }
            LumpKind::Sprite => LumpData::Sprite(Sprite::decode(bytes)?),
        })
    }
}

impl fmt::Display for LumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The structured contents of a decoded lump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LumpData {
    Things(Vec<Thing>),
    Vertexes(Vec<Vertex>),
    Linedefs(Vec<Linedef>),
    Sidedefs(Vec<Sidedef>),
    Sectors(Vec<Sector>),
    Segs(Vec<Seg>),
    Subsectors(Vec<Subsector>),
    Nodes(Vec<Node>),
    Reject(Vec<u8>),
    Blockmap(Blockmap),
    PatchNames(Vec<String>),
    Textures(Vec<texture::Texture>),
    Flat(Flat),
    Sprite(Sprite),
}

impl LumpData {
    pub fn kind(&self) -> LumpKind {
        match self {
            LumpData::Things(_) => LumpKind::Things,
            LumpData::Vertexes(_) => LumpKind::Vertexes,
            LumpData::Linedefs(_) => LumpKind::Linedefs,
            LumpData::Sidedefs(_) => LumpKind::Sidedefs,
            LumpData::Sectors(_) => LumpKind::Sectors,
            LumpData::Segs(_) => LumpKind::Segs,
            LumpData::Subsectors(_) => LumpKind::Subsectors,
            LumpData::Nodes(_) => LumpKind::Nodes,
            LumpData::Reject(_) => LumpKind::Reject,
            LumpData::Blockmap(_) => LumpKind::Blockmap,
            LumpData::PatchNames(_) => LumpKind::PatchNames,
            LumpData::Textures(_) => LumpKind::Textures,
            LumpData::Flat(_) => LumpKind::Flat,
            LumpData::Sprite(_) => LumpKind::Sprite,
        }
    }

    /// Serializes the records back into a lump payload.
    pub fn encode(&self) -> Result<Vec<u8>, WadError> {
        match self {
            LumpData::Things(records) => encode_records(records),
            LumpData::Vertexes(records) => encode_records(records),
            LumpData::Linedefs(records) => encode_records(records),
            LumpData::Sidedefs(records) => encode_records(records),
            LumpData::Sectors(records) => encode_records(records),
            LumpData::Segs(records) => encode_records(records),
            LumpData::Subsectors(records) => encode_records(records),
            LumpData::Nodes(records) => encode_records(records),
            LumpData::Reject(bytes) => Ok(reject::encode(bytes)),
            LumpData::Blockmap(blockmap) => blockmap.encode(),
            LumpData::PatchNames(names) => patch_names::encode(names),
            LumpData::Textures(textures) => texture::encode(textures),
            LumpData::Flat(flat) => Ok(flat.encode()),
            LumpData::Sprite(sprite) => sprite.encode(),
        }
    }
}

impl fmt::Display for LumpData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LumpData::Things(records) => thing::fmt_table(f, records),
            LumpData::Vertexes(records) => vertex::fmt_table(f, records),
            LumpData::Linedefs(records) => linedef::fmt_table(f, records),
            LumpData::Sidedefs(records) => sidedef::fmt_table(f, records),
            LumpData::Sectors(records) => sector::fmt_table(f, records),
            LumpData::Segs(records) => seg::fmt_table(f, records),
            LumpData::Subsectors(records) => subsector::fmt_table(f, records),
            LumpData::Nodes(records) => node::fmt_table(f, records),
            LumpData::Reject(bytes) => reject::fmt_table(f, bytes),
            LumpData::Blockmap(blockmap) => blockmap::fmt_table(f, blockmap),
            LumpData::PatchNames(names) => patch_names::fmt_table(f, names),
            LumpData::Textures(textures) => texture::fmt_table(f, textures),
            LumpData::Flat(data) => flat::fmt_table(f, data),
            LumpData::Sprite(data) => sprite::fmt_table(f, data),
        }
    }
}
