//! The sixteen distinct mnemonics of the Baby ISA (opcode 5 is SUB's second
//! encoding and is folded into `Opcode::Sub` before it ever reaches here).

use std::fmt;

/// All recognized instruction mnemonics, in opcode order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Jmp, // 0  - set CI to the operand (jump)
    Jrp, // 1  - add the operand to CI (relative jump)
    Ldn, // 2  - load accumulator with -S
    Sto, // 3  - store accumulator to memory
    Sub, // 4 (or 5) - subtract S from accumulator
    Cmp, // 6  - skip next instruction if accumulator is negative
    Stp, // 7  - halt
    Ldp, // 8  - load accumulator with +S
    Add, // 9  - add S to accumulator
    Div, // 10 - divide accumulator by S, truncating
    Mod, // 11 - accumulator modulo S
    Lan, // 12 - accumulator AND memory
    Lor, // 13 - accumulator OR memory
    Lnt, // 14 - bitwise NOT of accumulator
    Shl, // 15 - shift accumulator left by 1
    Shr, // 16 - shift accumulator right by 1
}

impl Opcode {
    /// Normalize raw opcode 5 into 4, then map to an `Opcode`. Returns
    /// `None` for any value outside the known instruction set.
    pub fn from_raw(raw: u8) -> Option<Self> {
        let raw = if raw == 5 { 4 } else { raw };
        Some(match raw {
            0 => Opcode::Jmp,
            1 => Opcode::Jrp,
            2 => Opcode::Ldn,
            3 => Opcode::Sto,
            4 => Opcode::Sub,
            6 => Opcode::Cmp,
            7 => Opcode::Stp,
            8 => Opcode::Ldp,
            9 => Opcode::Add,
            10 => Opcode::Div,
            11 => Opcode::Mod,
            12 => Opcode::Lan,
            13 => Opcode::Lor,
            14 => Opcode::Lnt,
            15 => Opcode::Shl,
            16 => Opcode::Shr,
            _ => return None,
        })
    }

    /// The raw numeric code this opcode encodes to. `Sub` always emits 4,
    /// never the alternate encoding 5.
    pub fn code(self) -> u8 {
        match self {
            Opcode::Jmp => 0,
            Opcode::Jrp => 1,
            Opcode::Ldn => 2,
            Opcode::Sto => 3,
            Opcode::Sub => 4,
            Opcode::Cmp => 6,
            Opcode::Stp => 7,
            Opcode::Ldp => 8,
            Opcode::Add => 9,
            Opcode::Div => 10,
            Opcode::Mod => 11,
            Opcode::Lan => 12,
            Opcode::Lor => 13,
            Opcode::Lnt => 14,
            Opcode::Shl => 15,
            Opcode::Shr => 16,
        }
    }

    /// Mnemonic text as it appears in source (uppercase, exact).
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Jmp => "JMP",
            Opcode::Jrp => "JRP",
            Opcode::Ldn => "LDN",
            Opcode::Sto => "STO",
            Opcode::Sub => "SUB",
            Opcode::Cmp => "CMP",
            Opcode::Stp => "STP",
            Opcode::Ldp => "LDP",
            Opcode::Add => "ADD",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::Lan => "LAN",
            Opcode::Lor => "LOR",
            Opcode::Lnt => "LNT",
            Opcode::Shl => "SHL",
            Opcode::Shr => "SHR",
        }
    }

    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        Some(match mnemonic {
            "JMP" => Opcode::Jmp,
            "JRP" => Opcode::Jrp,
            "LDN" => Opcode::Ldn,
            "STO" => Opcode::Sto,
            "SUB" => Opcode::Sub,
            "CMP" => Opcode::Cmp,
            "STP" => Opcode::Stp,
            "LDP" => Opcode::Ldp,
            "ADD" => Opcode::Add,
            "DIV" => Opcode::Div,
            "MOD" => Opcode::Mod,
            "LAN" => Opcode::Lan,
            "LOR" => Opcode::Lor,
            "LNT" => Opcode::Lnt,
            "SHL" => Opcode::Shl,
            "SHR" => Opcode::Shr,
            _ => return None,
        })
    }

    /// Whether this opcode accepts no operand token in source.
    pub fn takes_no_operand(self) -> bool {
        matches!(
            self,
            Opcode::Cmp | Opcode::Stp | Opcode::Lnt | Opcode::Shl | Opcode::Shr
        )
    }

    /// Whether `#immediate` addressing is permitted for this opcode.
    pub fn allows_immediate(self) -> bool {
        matches!(
            self,
            Opcode::Jmp
                | Opcode::Jrp
                | Opcode::Ldn
                | Opcode::Sub
                | Opcode::Ldp
                | Opcode::Add
                | Opcode::Div
                | Opcode::Mod
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_5_normalizes_to_sub() {
        assert_eq!(Opcode::from_raw(5), Some(Opcode::Sub));
        assert_eq!(Opcode::from_raw(4), Some(Opcode::Sub));
        assert_eq!(Opcode::Sub.code(), 4);
    }

    #[test]
    fn unknown_raw_opcode_is_none() {
        assert_eq!(Opcode::from_raw(17), None);
        assert_eq!(Opcode::from_raw(31), None);
    }

    #[test]
    fn mnemonic_round_trips() {
        for raw in [0u8, 1, 2, 3, 4, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16] {
            let op = Opcode::from_raw(raw).unwrap();
            assert_eq!(Opcode::from_mnemonic(op.mnemonic()), Some(op));
        }
    }
}
