use std::fs;
use std::path::{Path, PathBuf};

use mouselink_core::{Buttons, MotionFields, RawPacket};

const NONE: Buttons = Buttons {
    left: false,
    right: false,
    middle: false,
};
const LEFT: Buttons = Buttons {
    left: true,
    right: false,
    middle: false,
};
const RIGHT: Buttons = Buttons {
    left: false,
    right: true,
    middle: false,
};
const MIDDLE: Buttons = Buttons {
    left: false,
    right: false,
    middle: true,
};
const ALL: Buttons = Buttons {
    left: true,
    right: true,
    middle: true,
};

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");

    let mut basic = Capture::default();
    basic
        .packet(0, 0, NONE)?
        .packet(-1, 5, LEFT)?
        .packet(255, -256, ALL)?
        .packet(-200, 17, RIGHT)?;
    basic.write(&root.join("basic"))?;

    let mut noise = Capture::default();
    noise
        .bytes(&[0x00, 0x13, 0x37])
        .packet(3, -3, LEFT)?
        .bytes(&[0x55])
        .packet(-128, 128, MIDDLE)?;
    noise.write(&root.join("noise_resync"))?;

    let mut truncated = Capture::default();
    truncated
        .packet(10, -10, NONE)?
        .bytes(&[0xAA, 0x01, 0x00, 0x02]);
    truncated.write(&root.join("truncated_tail"))?;

    let mut reserved = Capture::default();
    reserved
        .bytes(&[0xAA, 0x05, 0xFE, 0xF0, 0xFF, 0xF9])
        .bytes(&[0xAA, 0x81, 0x81, 0x7F, 0x80, 0x86]);
    reserved.write(&root.join("reserved_bits"))?;

    // Aligned packets carrying 0xAA as ordinary body data.
    let mut marker_in_body = Capture::default();
    marker_in_body
        .packet(170, -86, NONE)?
        .packet(-86, 170, RIGHT)?;
    marker_in_body.write(&root.join("marker_in_body"))?;

    Ok(())
}

#[derive(Default)]
struct Capture {
    data: Vec<u8>,
}

impl Capture {
    fn packet(&mut self, dx: i16, dy: i16, buttons: Buttons) -> Result<&mut Self, String> {
        let packet = RawPacket::encode(&MotionFields { dx, dy, buttons })
            .map_err(|err| format!("invalid fixture packet: {}", err))?;
        self.data.extend_from_slice(packet.as_bytes());
        Ok(self)
    }

    fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    fn write(&self, dir: &Path) -> Result<(), String> {
        fs::create_dir_all(dir)
            .map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;
        let path = dir.join("input.bin");
        fs::write(&path, &self.data)
            .map_err(|err| format!("failed to write {}: {}", path.display(), err))
    }
}
