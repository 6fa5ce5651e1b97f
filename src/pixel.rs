use bytemuck::{Pod, Zeroable};

/// One 32-bit pixel in on-disk order: blue, green, red, reserved.
///
/// The byte order is **BGR + pad**, not RGB — it mirrors the file layout
/// exactly, so a `&[Pixel]` view can be cast straight over the pixel bytes.
/// The reserved byte is conventionally 0xFF in generated images but is
/// carried through unchanged when parsing; nothing may assume its value.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Pixel {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

impl Pixel {
    /// Opaque pixel from color channels; reserved byte set to 0xFF.
    pub const fn new(blue: u8, green: u8, red: u8) -> Self {
        Self {
            blue,
            green,
            red,
            reserved: 0xFF,
        }
    }

    pub const fn with_reserved(blue: u8, green: u8, red: u8, reserved: u8) -> Self {
        Self {
            blue,
            green,
            red,
            reserved,
        }
    }

    /// The four bytes as laid out in the file.
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.blue, self.green, self.red, self.reserved]
    }

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            blue: bytes[0],
            green: bytes[1],
            red: bytes[2],
            reserved: bytes[3],
        }
    }
}
