//! ColdFire / 68k instruction mnemonic tables.
//!
//! Each class is a non-capturing regex alternation with no anchors or size
//! qualifiers; callers wrap them (see [`mnemonic`] and [`sized_mnemonic`]).
//! All matching against these tables is case-insensitive.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Branches, jumps, subroutine calls and conditional set/branch (`Bcc`, `Scc`, `FBcc`).
pub const PROGRAM_CONTROL: &str = concat!(
    r"(?:FBCC|FB(?:EQ|NE|GT|NGT|GE|NGE|LT|NLT|LE|NLE|GL|NGL|GLE|NGLE|",
    r"OGT|ULE|OGE|ULT|OLT|UGE|OLE|UGT|OGL|UEQ|OR|UN|SF|ST|SEQ|SNE|F|T)|",
    r"BRA|BSR|JMP|JSR|",
    r"[BS](?:CC|HS|CS|LO|EQ|GE|GT|HI|LE|LS|LT|MI|NE|PL|VC|VS))"
);

pub const DATA_MOVEMENT: &str =
    r"(?:PEA|LEA|UNLK|LINK|MVS|MVZ|MOV3Q|MOVEA|MOVEM|MOVEQ|MOVE|MOVCLR|FDMOVE|FSMOVE|FMOVEM|FMOVE)";

pub const ARITHMETIC: &str = concat!(
    r"(?:(?:ADD|SUB)[AIQX]?|CLR|CMP[AI]?|DIV[SU]|EXTB?|MUL[SU]|NEGX?|",
    r"MAAAC|MAC|MASAC|MSAAC|MSAC|MSSAC)"
);

pub const FLOATING_POINT: &str =
    r"(?:FCMP|FINTRZ|FINT|F[SD]?(?:ADD|DIV|MUL|SUB|ABS|NEG|SQRT))";

pub const LOGICAL: &str = r"(?:ANDI?|E?ORI?|NOT|[AL]S[LR]|SWAP)";

pub const BITWISE: &str = r"(?:BCHG|BCLR|BTST|BSET|FF1|BITREV|BYTEREV)";

/// Every class that can take a symbolic operand, in match priority order.
pub const OPERAND_CLASSES: [&str; 6] = [
    PROGRAM_CONTROL,
    DATA_MOVEMENT,
    ARITHMETIC,
    FLOATING_POINT,
    LOGICAL,
    BITWISE,
];

/// A whole-word mnemonic from `class`.
pub fn mnemonic(class: &str) -> String {
    format!(r"\b{class}\b")
}

/// A whole-word mnemonic from `class` with an optional `.b`/`.w`/`.l` size.
pub fn sized_mnemonic(class: &str) -> String {
    format!(r"\b{class}(?:\.[bwl])?\b")
}

static PROGRAM_CONTROL_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(&mnemonic(PROGRAM_CONTROL))
        .case_insensitive(true)
        .build()
        .expect("program control regex should compile")
});

/// Whether `line` contains a branch, jump, or call instruction.
pub fn is_program_control(line: &str) -> bool {
    PROGRAM_CONTROL_RE.is_match(line)
}
