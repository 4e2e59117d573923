use serde::{Deserialize, Serialize};

use crate::protocol::layout;
use crate::protocol::{Buttons, MotionFields};

/// One decoded motion/button sample.
///
/// `sequence_number` starts at 1 and grows by one per decoded packet of the
/// decoder that produced it. `raw` holds the packet exactly as it arrived,
/// reserved bits included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionEvent {
    pub sequence_number: u64,
    pub dx: i16,
    pub dy: i16,
    pub button_left: bool,
    pub button_right: bool,
    pub button_middle: bool,
    pub raw: [u8; layout::PACKET_LEN],
}

impl MotionEvent {
    pub(crate) fn new(
        sequence_number: u64,
        fields: MotionFields,
        raw: [u8; layout::PACKET_LEN],
    ) -> Self {
        Self {
            sequence_number,
            dx: fields.dx,
            dy: fields.dy,
            button_left: fields.buttons.left,
            button_right: fields.buttons.right,
            button_middle: fields.buttons.middle,
            raw,
        }
    }

    pub fn buttons(&self) -> Buttons {
        Buttons {
            left: self.button_left,
            right: self.button_right,
            middle: self.button_middle,
        }
    }

    pub fn fields(&self) -> MotionFields {
        MotionFields {
            dx: self.dx,
            dy: self.dy,
            buttons: self.buttons(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MotionEvent;
    use crate::protocol::{Buttons, MotionFields};

    #[test]
    fn serializes_flat_fields() {
        let fields = MotionFields {
            dx: -1,
            dy: 2,
            buttons: Buttons {
                left: true,
                right: false,
                middle: true,
            },
        };
        let event = MotionEvent::new(7, fields, [0xAA, 0xFF, 0x01, 0x02, 0x00, 0x05]);
        let value = serde_json::to_value(event).expect("event json");
        assert_eq!(value["sequence_number"], 7);
        assert_eq!(value["dx"], -1);
        assert_eq!(value["button_middle"], true);
        assert_eq!(value["raw"][0], 0xAA);
        assert_eq!(event.fields(), fields);
    }
}
