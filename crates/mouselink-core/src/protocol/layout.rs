pub const SYNC_MARKER: u8 = 0xAA;
pub const PACKET_LEN: usize = 6;
pub const BODY_LEN: usize = PACKET_LEN - 1;

// Offsets are relative to the body, i.e. after the sync marker.
pub const DX_LOW_OFFSET: usize = 0;
pub const DX_HIGH_OFFSET: usize = 1;
pub const DY_LOW_OFFSET: usize = 2;
pub const DY_HIGH_OFFSET: usize = 3;
pub const BUTTONS_OFFSET: usize = 4;

pub const HIGH_BIT_MASK: u8 = 0x01;
pub const BUTTONS_MASK: u8 = 0x07;
pub const BUTTON_LEFT: u8 = 0x01;
pub const BUTTON_RIGHT: u8 = 0x02;
pub const BUTTON_MIDDLE: u8 = 0x04;

pub const NINE_BIT_MASK: u16 = 0x01FF;
pub const NINE_BIT_SIGN: u16 = 0x0100;
pub const NINE_BIT_MODULUS: i16 = 512;
pub const DELTA_MIN: i16 = -256;
pub const DELTA_MAX: i16 = 255;
