use crate::error::WadError;
use crate::lumps::fixed_record::FixedRecord;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{Read, Write};

/// Child index bit marking a subsector rather than another node.
pub const SUBSECTOR_BIT: u16 = 0x8000;

/// Axis-aligned bounds of one side of a BSP partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub top: i16,
    pub bottom: i16,
    pub left: i16,
    pub right: i16,
}

impl BoundingBox {
    fn read<R: Read>(reader: &mut R) -> Result<Self, WadError> {
        Ok(Self {
            top: reader.read_i16::<LittleEndian>()?,
            bottom: reader.read_i16::<LittleEndian>()?,
            left: reader.read_i16::<LittleEndian>()?,
            right: reader.read_i16::<LittleEndian>()?,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<(), WadError> {
        writer.write_i16::<LittleEndian>(self.top)?;
        writer.write_i16::<LittleEndian>(self.bottom)?;
        writer.write_i16::<LittleEndian>(self.left)?;
        writer.write_i16::<LittleEndian>(self.right)?;
        Ok(())
    }
}

/// An entry of the NODES lump: one partition line of the BSP tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub x: i16,
    pub y: i16,
    pub dx: i16,
    pub dy: i16,
    pub right_bbox: BoundingBox,
    pub left_bbox: BoundingBox,
    pub right_child: u16,
    pub left_child: u16,
}

impl Node {
    /// Returns true if the child index refers to a subsector.
    pub fn is_subsector(child: u16) -> bool {
        child & SUBSECTOR_BIT != 0
    }
}

impl FixedRecord for Node {
    const SIZE: usize = 28;
    const LUMP: &'static str = "NODES";

    fn read<R: Read>(reader: &mut R) -> Result<Self, WadError> {
        Ok(Self {
            x: reader.read_i16::<LittleEndian>()?,
            y: reader.read_i16::<LittleEndian>()?,
            dx: reader.read_i16::<LittleEndian>()?,
            dy: reader.read_i16::<LittleEndian>()?,
            right_bbox: BoundingBox::read(reader)?,
            left_bbox: BoundingBox::read(reader)?,
            right_child: reader.read_u16::<LittleEndian>()?,
            left_child: reader.read_u16::<LittleEndian>()?,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<(), WadError> {
        writer.write_i16::<LittleEndian>(self.x)?;
        writer.write_i16::<LittleEndian>(self.y)?;
        writer.write_i16::<LittleEndian>(self.dx)?;
        writer.write_i16::<LittleEndian>(self.dy)?;
        self.right_bbox.write(writer)?;
        self.left_bbox.write(writer)?;
        writer.write_u16::<LittleEndian>(self.right_child)?;
        writer.write_u16::<LittleEndian>(self.left_child)?;
        Ok(())
    }
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    writeln!(f, "  Node Data:")?;
    writeln!(f, "  X      Y      DX     DY     Right  Left")?;
    writeln!(f, "  {}", "-".repeat(44))?;
    for node in nodes {
        writeln!(
            f,
            "  {:6} {:6} {:6} {:6} {:#06x} {:#06x}",
            node.x, node.y, node.dx, node.dy, node.right_child, node.left_child
        )?;
    }
    Ok(())
}
