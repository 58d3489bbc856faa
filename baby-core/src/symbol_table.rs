//! Label -> address mapping built by pass 1 of the assembler and read back
//! during pass 2.

use std::collections::HashMap;

/// Maps label text to the memory address of the word it names.
///
/// `add` does not check for duplicates itself; the original `SymbolTable`
/// class didn't either, so detecting a redefinition is left to the caller
/// (the assembler calls `lookup` first and raises error 100 if it hits).
#[derive(Debug, Default)]
pub struct SymbolTable {
    table: HashMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            table: HashMap::new(),
        }
    }

    pub fn add(&mut self, label: &str, address: u32) {
        self.table.insert(label.to_string(), address);
    }

    pub fn lookup(&self, label: &str) -> Option<u32> {
        self.table.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.table.contains_key(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_lookup() {
        let mut table = SymbolTable::new();
        table.add("LOOP", 3);
        assert_eq!(table.lookup("LOOP"), Some(3));
        assert_eq!(table.lookup("MISSING"), None);
    }

    #[test]
    fn add_overwrites_silently() {
        let mut table = SymbolTable::new();
        table.add("X", 1);
        table.add("X", 2);
        assert_eq!(table.lookup("X"), Some(2));
    }
}
