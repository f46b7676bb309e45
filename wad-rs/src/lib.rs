//! # wad-rs
//!
//! `wad-rs` is a pure Rust implementation of a reader and editor for Doom-engine WAD archives.
//! It loads an archive's lumps into memory, decodes the well-known lump formats into typed
//! records, and writes the archive back with a freshly computed directory.
//!
//! ## Features
//! - Load and save IWAD/PWAD archives, byte-exact for archives this crate wrote
//! - Decode and encode map lumps (THINGS, VERTEXES, LINEDEFS, SIDEDEFS, SECTORS, SEGS,
//!   SSECTORS, NODES, REJECT, BLOCKMAP), PNAMES, TEXTURE1/TEXTURE2, flats and sprites
//! - Maintain `P_`, `S_` and `F_` marker sections while importing patches, sprites and flats
//! - Diagnostic dump that keeps going when a single lump fails to decode
//!
//! ## Usage
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! wad-rs = "0.1"
//! ```
//!
//! ### Example: Inspecting and Editing an Archive
//! ```rust,no_run
//! use wad_rs::wad_archive::WadArchive;
//! use wad_rs::codec_registry::LumpData;
//!
//! let mut wad = WadArchive::load("path/to/doom.wad").unwrap();
//!
//! // List all lumps
//! for lump in wad.lumps() {
//!     println!("Lump: {} ({} bytes)", lump.name(), lump.size());
//! }
//!
//! // Decode the first VERTEXES lump
//! if let Some(index) = wad.find_index("VERTEXES") {
//!     if let LumpData::Vertexes(vertexes) = wad.decode_lump(index).unwrap() {
//!         println!("{} vertexes", vertexes.len());
//!     }
//! }
//!
//! // Import a sprite and write the archive back out
//! wad.import_sprite("TROOA1", vec![0u8; 10]).unwrap();
//! wad.save("path/to/edited.wad").unwrap();
//! ```

pub mod codec_registry;
pub mod error;
mod ext;
pub mod image_source;
pub mod lumps;
pub mod marker_section;
pub mod utility;
pub mod wad_archive;
pub mod wad_config;
pub mod wad_header;
pub mod wad_lump;

pub use error::WadError;
