use bitflags::bitflags;

bitflags! {
    /// Set of pressed buttons, laid out like the joypad byte taken by
    /// [`crate::Machine::run_frame`] but active-high.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const RIGHT  = 1 << 0;
        const LEFT   = 1 << 1;
        const UP     = 1 << 2;
        const DOWN   = 1 << 3;
        const A      = 1 << 4;
        const B      = 1 << 5;
        const SELECT = 1 << 6;
        const START  = 1 << 7;
    }
}

impl Buttons {
    /// Active-low joypad byte: 0 bits are pressed buttons.
    pub fn joypad_byte(self) -> u8 {
        !self.bits()
    }

    /// Parse a `+`-separated list such as `"a+start"` or `"up+b"`.
    /// Unknown names yield `None`.
    pub fn parse(list: &str) -> Option<Self> {
        let mut buttons = Buttons::empty();
        for name in list.split('+').map(str::trim).filter(|s| !s.is_empty()) {
            buttons |= match name.to_ascii_lowercase().as_str() {
                "right" => Buttons::RIGHT,
                "left" => Buttons::LEFT,
                "up" => Buttons::UP,
                "down" => Buttons::DOWN,
                "a" => Buttons::A,
                "b" => Buttons::B,
                "select" => Buttons::SELECT,
                "start" => Buttons::START,
                _ => return None,
            };
        }
        Some(buttons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_buttons_is_all_released() {
        assert_eq!(Buttons::empty().joypad_byte(), 0xFF);
    }

    #[test]
    fn parse_combines_names() {
        let buttons = Buttons::parse("A+Start").unwrap();
        assert_eq!(buttons, Buttons::A | Buttons::START);
        assert_eq!(buttons.joypad_byte(), 0x6F);
        assert_eq!(Buttons::parse("turbo"), None);
    }
}
