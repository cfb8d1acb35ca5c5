use super::traits::Record;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// The `global_` header block, if the file has one.
    pub global: Option<Block>,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn find_block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// A tag/value pair from the `global_` header.
    pub fn global_value(&self, tag: &str) -> Option<&str> {
        self.global.as_ref().and_then(|g| g.find_value(tag))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Pair { tag: String, value: String },
    Loop(Loop),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    pub tags: Vec<String>,
    pub values: Vec<String>,
}

impl Loop {
    fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.values.chunks(self.tags.len().max(1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub name: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Category '{category}' has no required column '{column}'")]
    MissingColumn { category: String, column: String },
    #[error("Invalid value '{value}' in '{category}{column}' (expected {expected})")]
    InvalidValue {
        category: String,
        column: String,
        value: String,
        expected: &'static str,
    },
}

fn tag_matches(tag: &str, category: &str) -> bool {
    tag.len() > category.len()
        && tag.is_char_boundary(category.len())
        && tag[..category.len()].eq_ignore_ascii_case(category)
}

fn column_of<'t>(tag: &'t str, category: &str) -> &'t str {
    &tag[category.len()..]
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Returns the value of a single tag/value pair.
    pub fn find_value(&self, tag: &str) -> Option<&str> {
        self.items.iter().find_map(|item| match item {
            Item::Pair { tag: t, value } if t.eq_ignore_ascii_case(tag) => Some(value.as_str()),
            _ => None,
        })
    }

    /// Resolves the table for `category` projected onto `columns`.
    ///
    /// A `loop_` takes precedence over loose pairs of the same category. An
    /// absent category yields an empty table.
    pub fn find<'a>(&'a self, category: &str, columns: &[&str]) -> Result<Table<'a>, TableError> {
        let names: Vec<String> = columns
            .iter()
            .map(|c| c.trim_start_matches('?').to_string())
            .collect();
        let optional: Vec<bool> = columns.iter().map(|c| c.starts_with('?')).collect();

        let missing = |column: &str| TableError::MissingColumn {
            category: category.to_string(),
            column: column.to_string(),
        };

        let looped = self.items.iter().find_map(|item| match item {
            Item::Loop(lp) if lp.tags.iter().any(|t| tag_matches(t, category)) => Some(lp),
            _ => None,
        });

        if let Some(lp) = looped {
            let mut positions = Vec::with_capacity(names.len());
            for (name, &opt) in names.iter().zip(&optional) {
                let pos = lp.tags.iter().position(|t| {
                    tag_matches(t, category) && column_of(t, category).eq_ignore_ascii_case(name)
                });
                match pos {
                    Some(p) => positions.push(Some(p)),
                    None if opt => positions.push(None),
                    None => return Err(missing(name)),
                }
            }
            let rows = lp
                .rows()
                .map(|values| {
                    positions
                        .iter()
                        .map(|p| p.and_then(|i| values.get(i)).map_or("", String::as_str))
                        .collect()
                })
                .collect();
            return Ok(Table {
                category: category.to_string(),
                columns: names,
                rows,
            });
        }

        let pairs: Vec<(&str, &str)> = self
            .items
            .iter()
            .filter_map(|item| match item {
                Item::Pair { tag, value } if tag_matches(tag, category) => {
                    Some((column_of(tag, category), value.as_str()))
                }
                _ => None,
            })
            .collect();

        if pairs.is_empty() {
            return Ok(Table {
                category: category.to_string(),
                columns: names,
                rows: Vec::new(),
            });
        }

        let mut row = Vec::with_capacity(names.len());
        for (name, &opt) in names.iter().zip(&optional) {
            match pairs.iter().find(|(c, _)| c.eq_ignore_ascii_case(name)) {
                Some((_, value)) => row.push(*value),
                None if opt => row.push(""),
                None => return Err(missing(name)),
            }
        }
        Ok(Table {
            category: category.to_string(),
            columns: names,
            rows: vec![row],
        })
    }

    /// Reads every row of `R`'s table as a typed record.
    pub fn records<R: Record>(&self) -> Result<Vec<R>, TableError> {
        let table = self.find(R::CATEGORY, R::COLUMNS)?;
        let records: Result<Vec<R>, TableError> =
            table.rows().map(|row| R::from_row(&row)).collect();
        records
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table<'a> {
    category: String,
    columns: Vec<String>,
    rows: Vec<Vec<&'a str>>,
}

impl<'a> Table<'a> {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row {
            category: &self.category,
            columns: &self.columns,
            values,
        })
    }
}

/// One row of a [`Table`], addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'t> {
    category: &'t str,
    columns: &'t [String],
    values: &'t [&'t str],
}

impl<'t> Row<'t> {
    pub fn get(&self, column: &str) -> Option<&'t str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i).copied())
    }

    /// The value in `column`, or the empty string for null and undeclared columns.
    pub fn str(&self, column: &str) -> &'t str {
        self.get(column).unwrap_or("")
    }

    pub fn string(&self, column: &str) -> String {
        self.str(column).to_string()
    }

    pub fn invalid(&self, column: &str, expected: &'static str) -> TableError {
        TableError::InvalidValue {
            category: self.category.to_string(),
            column: column.to_string(),
            value: self.str(column).to_string(),
            expected,
        }
    }
}
