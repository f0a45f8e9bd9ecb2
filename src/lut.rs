//! Flattened gait look-up table the robot replays at [`GAIT_FREQUENCY_HZ`].
//!
//! Every movement of every generated set becomes one segment of a single frame
//! table in servo ticks. The robot finds a gait by its index, then steps
//! through the segment and wraps.
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;
use log::{info, warn};

use crate::config::{GAIT_FREQUENCY_HZ, GAIT_INTERVAL_MS};
use crate::error::LutError;
use crate::gait::{Frame, GaitFamily, GaitTrajectorySet, Movement};
use crate::kinematics::conversion::deg_to_ticks;
use crate::robot::commands::gait_index;

/// Slots in the offset tables: one per possible gait index.
pub const GAIT_SLOTS: usize = GaitFamily::ALL.len() * Movement::COUNT;

/// Most frames the firmware can address with its `unsigned short` offsets.
pub const MAX_LUT_FRAMES: usize = u16::MAX as usize;

/// Where one gait's frames sit in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaitSegment {
    pub gait_id: usize,
    pub family: GaitFamily,
    pub movement: Movement,
    pub start: usize,
    pub len: usize,
}

pub type TickFrame = [i32; 8];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GaitLut {
    frames: Vec<TickFrame>,
    segments: Vec<GaitSegment>,
}

fn to_ticks(frame: &Frame) -> TickFrame {
    frame.0.map(deg_to_ticks)
}

impl GaitLut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sets<'a>(
        sets: impl IntoIterator<Item = &'a GaitTrajectorySet>,
    ) -> Result<Self, LutError> {
        let mut lut = Self::new();
        for set in sets {
            lut.push_set(set)?;
        }
        Ok(lut)
    }

    /// Append every movement of `set`. A gait already in the table is kept and
    /// the new one skipped. A set that would overflow the table is rejected
    /// whole.
    pub fn push_set(&mut self, set: &GaitTrajectorySet) -> Result<(), LutError> {
        let added: usize = set
            .iter()
            .filter(|(movement, _)| self.segment(gait_index(set.family(), *movement)).is_none())
            .map(|(_, frames)| frames.len())
            .sum();
        let frames = self.frames.len() + added;
        if frames > MAX_LUT_FRAMES {
            return Err(LutError::TooManyFrames {
                frames,
                max: MAX_LUT_FRAMES,
            });
        }

        for (movement, frames) in set.iter() {
            let gait_id = gait_index(set.family(), movement);
            if self.segment(gait_id).is_some() {
                warn!("[LUT] {} {} already in the table, skipping", set.family(), movement);
                continue;
            }

            self.segments.push(GaitSegment {
                gait_id,
                family: set.family(),
                movement,
                start: self.frames.len(),
                len: frames.len(),
            });
            self.frames.extend(frames.iter().map(to_ticks));
        }
        info!(
            "[LUT] added {}, table now {} frames in {} gaits",
            set.family(),
            self.frames.len(),
            self.segments.len()
        );
        Ok(())
    }

    pub fn segments(&self) -> &[GaitSegment] {
        &self.segments
    }

    pub fn segment(&self, gait_id: usize) -> Option<&GaitSegment> {
        self.segments.iter().find(|s| s.gait_id == gait_id)
    }

    /// All frames, in table order.
    pub fn frames(&self) -> &[TickFrame] {
        &self.frames
    }

    pub fn gait(&self, gait_id: usize) -> Option<&[TickFrame]> {
        self.segment(gait_id)
            .map(|segment| &self.frames[segment.start..segment.start + segment.len])
    }

    /// Frame `step` of a gait, wrapping past the end of the cycle.
    pub fn frame(&self, gait_id: usize, step: usize) -> Option<&TickFrame> {
        let gait = self.gait(gait_id)?;
        if gait.is_empty() {
            return None;
        }
        gait.get(step % gait.len())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// `(offset, length)` per gait index; missing gaits are `(0, 0)`.
    pub fn offset_table(&self) -> [(usize, usize); GAIT_SLOTS] {
        let mut table = [(0, 0); GAIT_SLOTS];
        for segment in &self.segments {
            table[segment.gait_id] = (segment.start, segment.len);
        }
        table
    }

    /// C header with `GaitLUT`, `GaitLUTOffsets` and `GaitLUTLengths`, meant to
    /// be included by the firmware's `gait_lut.h`.
    pub fn render_c_header(&self) -> String {
        let mut out = String::new();
        // writing to a String cannot fail
        let _ = self.write_c_header(&mut out);
        out
    }

    fn write_c_header(&self, out: &mut String) -> core::fmt::Result {
        let offsets = self.offset_table();

        writeln!(out, "// Generated by gait_lut. Do not edit.")?;
        writeln!(out, "#ifndef __INCLUDING_GENERATED_LUTS")?;
        writeln!(out, "#error \"Include gait_lut.h instead\"")?;
        writeln!(out, "#endif")?;
        writeln!(out)?;
        writeln!(out, "#include <stdint.h>")?;
        writeln!(out)?;
        writeln!(out, "#define GAIT_LUT_FREQUENCY_HZ {GAIT_FREQUENCY_HZ}")?;
        writeln!(out, "#define GAIT_LUT_INTERVAL_MS {GAIT_INTERVAL_MS}")?;
        writeln!(out, "#define GAIT_LUT_FRAMES {}", self.frames.len())?;
        writeln!(out, "#define GAIT_LUT_GAITS {GAIT_SLOTS}")?;
        writeln!(out)?;

        write!(out, "const unsigned short GaitLUTOffsets[GAIT_LUT_GAITS] = {{")?;
        write_list(out, offsets.iter().map(|(start, _)| *start))?;
        writeln!(out, "}};")?;
        write!(out, "const unsigned short GaitLUTLengths[GAIT_LUT_GAITS] = {{")?;
        write_list(out, offsets.iter().map(|(_, len)| *len))?;
        writeln!(out, "}};")?;
        writeln!(out)?;

        // an empty table still needs one row to be valid C
        let rows = self.frames.len().max(1);
        writeln!(out, "const int32_t GaitLUT[{rows}][8] = {{")?;
        for segment in &self.segments {
            writeln!(
                out,
                "    // {} {} (gait {})",
                segment.family, segment.movement, segment.gait_id
            )?;
            for frame in &self.frames[segment.start..segment.start + segment.len] {
                write!(out, "    {{")?;
                write_list(out, frame.iter())?;
                writeln!(out, "}},")?;
            }
        }
        if self.frames.is_empty() {
            writeln!(out, "    {{0, 0, 0, 0, 0, 0, 0, 0}},")?;
        }
        writeln!(out, "}};")
    }
}

fn write_list<T: core::fmt::Display>(
    out: &mut String,
    values: impl Iterator<Item = T>,
) -> core::fmt::Result {
    for (i, value) in values.enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(out, "{value}")?;
    }
    Ok(())
}
