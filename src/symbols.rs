use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use unicode_width::UnicodeWidthStr;

use crate::error::GameError;
use crate::input::Direction;

const USER_SYMBOLS_APP_DIR: &str = "grid-snake";
const USER_SYMBOLS_SUBDIR: &str = "symbols";

/// Names of the symbol tables compiled into the binary.
pub const BUILTIN_SYMBOLS: &[&str] = &["classic", "blocks"];

/// Which part of the snake a cell shows.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Role {
    Head,
    Tail,
}

/// Contents of one render-buffer cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cell {
    Empty,
    Fruit,
    Snake(Role, Direction),
}

/// Display strings for every [`Cell`] variant.
///
/// All entries share one terminal display width so rows stay aligned.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SymbolTable {
    pub name: String,
    head: [String; 4],
    tail: [String; 4],
    empty: String,
    fruit: String,
}

impl SymbolTable {
    /// ASCII arrows for the head, bars for the body.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            name: "classic".to_owned(),
            head: ["^", "v", "<", ">"].map(str::to_owned),
            tail: ["|", "|", "-", "-"].map(str::to_owned),
            empty: ".".to_owned(),
            fruit: "@".to_owned(),
        }
    }

    /// Two-column block glyphs, roughly square on most terminal fonts.
    #[must_use]
    pub fn blocks() -> Self {
        Self {
            name: "blocks".to_owned(),
            head: ["██", "██", "██", "██"].map(str::to_owned),
            tail: ["▓▓", "▓▓", "▓▓", "▓▓"].map(str::to_owned),
            empty: "░░".to_owned(),
            fruit: "()".to_owned(),
        }
    }

    /// Returns a built-in table by name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::classic()),
            "blocks" => Some(Self::blocks()),
            _ => None,
        }
    }

    /// Resolves `--symbols`: a built-in name, a JSON file path, or
    /// `<name>.json` in the user config directory.
    pub fn resolve(requested: &str) -> Result<Self, GameError> {
        if let Some(table) = Self::builtin(requested) {
            return Ok(table);
        }

        let direct = Path::new(requested);
        if direct.is_file() {
            return Self::from_path(direct);
        }

        if let Some(path) = user_symbols_path(requested).filter(|path| path.is_file()) {
            return Self::from_path(&path);
        }

        Err(GameError::InvalidArgument(format!(
            "unknown symbol table '{requested}' (built-in: {})",
            BUILTIN_SYMBOLS.join(", ")
        )))
    }

    /// Loads a JSON symbol file; missing keys fall back to [`SymbolTable::classic`].
    pub fn from_path(path: &Path) -> Result<Self, GameError> {
        let raw = fs::read_to_string(path).map_err(|source| GameError::SymbolIo {
            path: path.to_path_buf(),
            source,
        })?;

        let fallback_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("custom");
        Self::from_json_str(fallback_name, &raw)
    }

    /// Parses a JSON symbol table.
    pub fn from_json_str(fallback_name: &str, raw: &str) -> Result<Self, GameError> {
        let parsed = serde_json::from_str::<SymbolFile>(raw)?;
        let fallback = Self::classic();

        let table = Self {
            name: parsed.name.unwrap_or_else(|| fallback_name.to_owned()),
            head: parsed.head.unwrap_or_default().resolve(&fallback.head),
            tail: parsed.tail.unwrap_or_default().resolve(&fallback.tail),
            empty: parsed.empty.unwrap_or(fallback.empty),
            fruit: parsed.fruit.unwrap_or(fallback.fruit),
        };
        table.check_widths()?;
        Ok(table)
    }

    /// Returns the display string for `cell`.
    #[must_use]
    pub fn symbol(&self, cell: Cell) -> &str {
        match cell {
            Cell::Empty => &self.empty,
            Cell::Fruit => &self.fruit,
            Cell::Snake(Role::Head, direction) => &self.head[direction_index(direction)],
            Cell::Snake(Role::Tail, direction) => &self.tail[direction_index(direction)],
        }
    }

    /// Terminal columns used by one cell.
    #[must_use]
    pub fn cell_width(&self) -> usize {
        self.empty.width()
    }

    fn all_symbols(&self) -> impl Iterator<Item = &String> {
        self.head
            .iter()
            .chain(self.tail.iter())
            .chain([&self.empty, &self.fruit])
    }

    fn check_widths(&self) -> Result<(), GameError> {
        let expected = self.cell_width();
        if expected == 0 {
            return Err(GameError::InvalidArgument(
                "the empty symbol must not be blank".to_owned(),
            ));
        }

        if let Some(odd) = self.all_symbols().find(|symbol| symbol.width() != expected) {
            return Err(GameError::InvalidArgument(format!(
                "symbol '{odd}' is {} columns wide, expected {expected}",
                odd.width()
            )));
        }

        Ok(())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::classic()
    }
}

fn direction_index(direction: Direction) -> usize {
    match direction {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}

fn user_symbols_path(name: &str) -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push(USER_SYMBOLS_APP_DIR);
    path.push(USER_SYMBOLS_SUBDIR);
    path.push(format!("{name}.json"));
    Some(path)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SymbolFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    head: Option<DirectionalSymbols>,
    #[serde(default)]
    tail: Option<DirectionalSymbols>,
    #[serde(default)]
    empty: Option<String>,
    #[serde(default)]
    fruit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DirectionalSymbols {
    up: Option<String>,
    down: Option<String>,
    left: Option<String>,
    right: Option<String>,
}

impl DirectionalSymbols {
    fn resolve(self, fallback: &[String; 4]) -> [String; 4] {
        let [up, down, left, right] = fallback.clone();
        [
            self.up.unwrap_or(up),
            self.down.unwrap_or(down),
            self.left.unwrap_or(left),
            self.right.unwrap_or(right),
        ]
    }
}
