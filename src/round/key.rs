//! Key events accepted by a round

/// On-screen keyboard layout, top row first
pub const KEYBOARD_ROWS: [&[&str]; 3] = [
    &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"],
    &["A", "S", "D", "F", "G", "H", "J", "K", "L"],
    &["Enter", "Z", "X", "C", "V", "B", "N", "M", "Backspace"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// An uppercase ASCII letter
    Letter(u8),
    Backspace,
    Enter,
}

impl Key {
    /// Map a typed character to a letter key
    ///
    /// Returns `None` for anything but ASCII letters.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        c.is_ascii_alphabetic()
            .then(|| Self::Letter(c.to_ascii_uppercase() as u8))
    }

    /// Parse a key name as produced by a browser or the on-screen keyboard
    ///
    /// Accepts `"Enter"`, `"Backspace"` and single letters in either case.
    ///
    /// # Examples
    /// ```
    /// use wordle_rooms::round::Key;
    ///
    /// assert_eq!(Key::from_name("Enter"), Some(Key::Enter));
    /// assert_eq!(Key::from_name("q"), Some(Key::Letter(b'Q')));
    /// assert_eq!(Key::from_name("Shift"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Enter" => Some(Self::Enter),
            "Backspace" => Some(Self::Backspace),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_char(c),
                    _ => None,
                }
            }
        }
    }
}
