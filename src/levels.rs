use std::fmt;
use std::fs;
use std::io;

use crate::board::Board;

#[derive(Debug)]
pub enum LevelError {
    /// IO error when reading from file
    Io(io::Error),
    /// Invalid level content
    InvalidLevel(String),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io(err) => write!(f, "IO error: {}", err),
            LevelError::InvalidLevel(msg) => write!(f, "Invalid level: {}", msg),
        }
    }
}

impl From<io::Error> for LevelError {
    fn from(err: io::Error) -> Self {
        LevelError::Io(err)
    }
}

impl From<String> for LevelError {
    fn from(err: String) -> Self {
        LevelError::InvalidLevel(err)
    }
}

/// A collection of puzzle levels loaded from text.
///
/// Levels are separated by blank lines and/or `;`-prefixed comment lines,
/// with the usual `# @$.*+` board alphabet in between. Short rows are padded
/// with empty cells when the board is built.
#[derive(Debug)]
pub struct Levels {
    boards: Vec<Board>,
}

impl Levels {
    pub fn from_text(contents: &str) -> Result<Self, LevelError> {
        let mut boards = Vec::new();
        let mut chunk = String::new();

        for line in contents.lines() {
            let is_separator = line.trim().is_empty() || line.trim_start().starts_with(';');
            if is_separator {
                Self::flush(&mut chunk, &mut boards)?;
            } else {
                chunk.push_str(line);
                chunk.push('\n');
            }
        }
        Self::flush(&mut chunk, &mut boards)?;

        Ok(Levels { boards })
    }

    pub fn from_file(path: &str) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    fn flush(chunk: &mut String, boards: &mut Vec<Board>) -> Result<(), LevelError> {
        if !chunk.is_empty() {
            boards.push(Board::from_text(chunk.trim_end())?);
            chunk.clear();
        }
        Ok(())
    }

    /// Get the nth level (0-indexed).
    pub fn get(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_basic() {
        let level1 = "#####\n#@$.#\n#####";
        let level2 = "######\n#    #\n# #@ #\n# $* #\n# .* #\n#    #\n######";
        let level3 = "  ####\n###  ####\n#     $ #\n# #  #$ #\n# . .#@ #\n#########";

        let contents = format!("; 1\n\n{}\n\n; 2\n\n{}\n\n; 3\n\n{}\n", level1, level2, level3);
        let levels = Levels::from_text(&contents).unwrap();

        assert_eq!(levels.len(), 3);
        assert_eq!(levels.get(0).unwrap().to_string().trim_end(), level1);
        assert_eq!(levels.get(1).unwrap().to_string().trim_end(), level2);
        assert_eq!(levels.get(2).unwrap().to_string().trim_end(), level3);
        assert!(levels.get(3).is_none());
    }

    #[test]
    fn test_from_text_no_trailing_newline() {
        let contents = "#####\n#@$.#\n#####";
        let levels = Levels::from_text(contents).unwrap();
        assert_eq!(levels.len(), 1);
    }

    #[test]
    fn test_from_text_invalid_level() {
        let contents = "; broken\n\n####\n#@@#\n####\n";
        let result = Levels::from_text(contents);
        assert!(matches!(result, Err(LevelError::InvalidLevel(_))));
    }

    #[test]
    fn test_from_text_empty() {
        let levels = Levels::from_text("").unwrap();
        assert!(levels.is_empty());
    }

    #[test]
    fn test_from_file_missing() {
        let result = Levels::from_file("does_not_exist.xsb");
        assert!(matches!(result, Err(LevelError::Io(_))));
    }
}
