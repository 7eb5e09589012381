//! Fixed hardware codebooks for the X9 control protocol.
//!
//! Every control payload is a feature report with ID 0x07:
//!
//! ```text
//! [0x07] [opcode] [data ...] [0x00 padding up to 8 bytes]
//! ```

/// Total length of every control frame, header included.
pub const FRAME_LEN: usize = 8;

/// Header length (channel selector + opcode).
pub const HEADER_LEN: usize = 2;

/// Channel selector; doubles as the HID feature report ID.
pub const CHANNEL_SELECTOR: u8 = 0x07;

/// Instruction opcodes (frame byte 1).
pub mod opcodes {
    /// Per-profile DPI and enablement.
    pub const DPI: u8 = 0x09;
    /// Scroll-wheel function.
    pub const SCROLLWHEEL: u8 = 0x11;
    /// RGB lighting animation.
    pub const RGB_LIGHTING: u8 = 0x13;
    /// Per-profile color.
    pub const COLOR_PROFILE: u8 = 0x14;
}

/// DPI steps the sensor supports, ascending.
pub const SUPPORTED_DPIS: [u32; 12] = [
    200, 400, 600, 800, 1000, 1200, 1600, 2000, 2400, 3200, 4000, 4800,
];

/// DPI → 4-bit code. Codes 0x8, 0xA and 0xC are unused by the firmware.
pub const DPI_CODES: [(u32, u8); 12] = [
    (200, 0x1),
    (400, 0x2),
    (600, 0x3),
    (800, 0x4),
    (1000, 0x5),
    (1200, 0x6),
    (1600, 0x7),
    (2000, 0x9),
    (2400, 0xB),
    (3200, 0xD),
    (4000, 0xE),
    (4800, 0xF),
];

/// Number of hardware profiles.
pub const PROFILE_COUNT: usize = 6;

/// Scheme bytes for the RGB lighting frame.
pub mod scheme {
    /// Fixed (breathing) band base; duration is subtracted.
    pub const FIXED_BASE: u8 = 0x86;
    /// Cyclic band base; duration is subtracted.
    pub const CYCLIC_BASE: u8 = 0x96;
    pub const STATIC: u8 = 0x86;
    pub const OFF: u8 = 0x87;
}
