//! Text formatting for DCPU-16 assembly.

/// LEM1802 hardware id, high and low words.
pub const LEM1802_ID: (u16, u16) = (0x7349, 0xf615);

/// LEM1802 interrupt: map screen memory to B.
pub const MEM_MAP_SCREEN: u16 = 0;
/// LEM1802 interrupt: map font memory to B.
pub const MEM_MAP_FONT: u16 = 1;
/// LEM1802 interrupt: map palette memory to B.
pub const MEM_MAP_PALETTE: u16 = 2;

/// Fixed screen address used by the legacy layout.
pub const LEGACY_SCREEN_BASE: u16 = 0x8000;
/// Fixed font address used by the legacy layout.
pub const LEGACY_FONT_BASE: u16 = 0x8180;

/// Words per `DAT` line.
pub const DAT_WORDS_PER_LINE: usize = 8;

/// Words left for data tables once the setup and animation code is placed.
pub const MAX_DATA_WORDS: usize = 0x10000 - 0x0200;

/// Indent for instructions guarded by an `IFx`.
const INDENT: &str = "    ";

/// Lowercase 4-digit hex literal.
pub fn hex(value: u16) -> String {
    format!("0x{:04x}", value)
}

/// `:label` line.
pub fn label(name: &str) -> String {
    format!(":{}", name)
}

/// Instruction guarded by `depth` conditionals.
pub fn nested(depth: usize, instruction: impl AsRef<str>) -> String {
    format!("{}{}", INDENT.repeat(depth), instruction.as_ref())
}

/// Direct memory write, `SET [0x8xxx], 0xwwww`.
pub fn set_memory(address: u16, word: u16) -> String {
    format!("SET [{}], {}", hex(address), hex(word))
}

/// `DAT` lines holding `words`, a fixed number per line.
pub fn dat_lines(words: &[u16]) -> Vec<String> {
    words
        .chunks(DAT_WORDS_PER_LINE)
        .map(|chunk| {
            let values: Vec<String> = chunk.iter().map(|&w| hex(w)).collect();
            format!("DAT {}", values.join(", "))
        })
        .collect()
}

/// Comment line.
pub fn comment(text: impl AsRef<str>) -> String {
    format!("; {}", text.as_ref())
}
