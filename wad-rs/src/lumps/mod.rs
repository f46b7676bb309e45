//! Binary codecs for the individual lump formats.
//!
//! Fixed-size map records implement [`fixed_record::FixedRecord`] and are decoded
//! through [`fixed_record::decode_records`]. The variable layouts (PNAMES, TEXTUREx,
//! BLOCKMAP, flats, sprites) expose their own `decode`/`encode` pair.

pub mod blockmap;
pub mod fixed_record;
pub mod flat;
pub mod linedef;
pub mod node;
pub mod patch_names;
pub mod reject;
pub mod sector;
pub mod seg;
pub mod sidedef;
pub mod sprite;
pub mod subsector;
pub mod texture;
pub mod thing;
pub mod vertex;
