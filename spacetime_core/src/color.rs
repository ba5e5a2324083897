// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-process color allocation.
//!
//! Each process gets one color from the session's [`Palette`], taken in
//! palette order on first encounter and never reassigned. The palette belongs
//! to the session configuration, so independent sessions never compete for
//! the same colors.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::error::LayoutError;
use crate::event::ProcessId;

/// An opaque RGB color.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `red`.
    pub const RED: Self = Self::rgb(0xff, 0x00, 0x00);
    /// CSS `green`.
    pub const GREEN: Self = Self::rgb(0x00, 0x80, 0x00);
    /// CSS `blue`.
    pub const BLUE: Self = Self::rgb(0x00, 0x00, 0xff);
    /// CSS `fuchsia`.
    pub const FUCHSIA: Self = Self::rgb(0xff, 0x00, 0xff);
    /// CSS `gray`.
    pub const GRAY: Self = Self::rgb(0x80, 0x80, 0x80);
    /// CSS `purple`.
    pub const PURPLE: Self = Self::rgb(0x80, 0x00, 0x80);
    /// CSS `lime`.
    pub const LIME: Self = Self::rgb(0x00, 0xff, 0x00);
    /// CSS `maroon`.
    pub const MAROON: Self = Self::rgb(0x80, 0x00, 0x00);
    /// CSS `navy`.
    pub const NAVY: Self = Self::rgb(0x00, 0x00, 0x80);
    /// CSS `olive`.
    pub const OLIVE: Self = Self::rgb(0x80, 0x80, 0x00);
    /// CSS `orange`.
    pub const ORANGE: Self = Self::rgb(0xff, 0xa5, 0x00);
    /// CSS `black`.
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    /// CSS `aqua`.
    pub const AQUA: Self = Self::rgb(0x00, 0xff, 0xff);
    /// CSS `silver`.
    pub const SILVER: Self = Self::rgb(0xc0, 0xc0, 0xc0);
    /// CSS `teal`.
    pub const TEAL: Self = Self::rgb(0x00, 0x80, 0x80);
    /// CSS `white`.
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    /// CSS `yellow`.
    pub const YELLOW: Self = Self::rgb(0xff, 0xff, 0x00);
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({self})")
    }
}

/// Formats as a `#rrggbb` hex triplet.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The standard palette, in allocation order.
const STANDARD: [Color; 17] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::FUCHSIA,
    Color::GRAY,
    Color::PURPLE,
    Color::LIME,
    Color::MAROON,
    Color::NAVY,
    Color::OLIVE,
    Color::ORANGE,
    Color::BLACK,
    Color::AQUA,
    Color::SILVER,
    Color::TEAL,
    Color::WHITE,
    Color::YELLOW,
];

/// A finite, ordered list of colors to allocate from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Palette(Vec<Color>);

impl Palette {
    /// Creates a palette from colors in allocation order.
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    /// The 17 standard CSS colors, starting with red, green, blue.
    #[must_use]
    pub fn standard() -> Self {
        Self(STANDARD.to_vec())
    }

    /// Returns the number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the palette has no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the colors in allocation order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

/// What happens when more processes appear than the palette has colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaletteExhaustion {
    /// Wrap around to the first color.
    #[default]
    Cycle,
    /// Fail with [`LayoutError::PaletteExhausted`].
    Fail,
}

/// Assigns a stable color to each distinct process.
#[derive(Clone, Debug)]
pub struct ColorAllocator {
    palette: Palette,
    exhaustion: PaletteExhaustion,
    next: usize,
    assigned: HashMap<ProcessId, Color>,
}

impl ColorAllocator {
    /// Creates an allocator with no assignments.
    #[must_use]
    pub fn new(palette: Palette, exhaustion: PaletteExhaustion) -> Self {
        Self {
            palette,
            exhaustion,
            next: 0,
            assigned: HashMap::new(),
        }
    }

    /// Returns the color of `process`, allocating one on first use.
    pub fn color_for(&mut self, process: &ProcessId) -> Result<Color, LayoutError> {
        if let Some(color) = self.assigned.get(process) {
            return Ok(*color);
        }

        let colors = self.palette.colors();
        let exhausted = LayoutError::PaletteExhausted {
            palette_len: colors.len(),
        };
        let color = match (colors.get(self.next), self.exhaustion) {
            (Some(color), _) => *color,
            (None, PaletteExhaustion::Fail) => return Err(exhausted),
            (None, PaletteExhaustion::Cycle) => {
                if colors.is_empty() {
                    return Err(exhausted);
                }
                log::debug!(
                    "palette of {} colors exhausted, reusing colors for {:?}",
                    colors.len(),
                    process
                );
                colors[self.next % colors.len()]
            }
        };

        self.next += 1;
        self.assigned.insert(process.clone(), color);
        Ok(color)
    }

    /// Returns the color already assigned to `process`, if any.
    #[must_use]
    pub fn get(&self, process: &ProcessId) -> Option<Color> {
        self.assigned.get(process).copied()
    }

    /// Returns the number of processes with an assigned color.
    #[must_use]
    pub fn assigned_len(&self) -> usize {
        self.assigned.len()
    }

    /// Forgets every assignment and restores the full palette.
    pub fn restore(&mut self) {
        self.next = 0;
        self.assigned.clear();
    }
}
