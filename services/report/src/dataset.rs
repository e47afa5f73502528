/// Value of one spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// No value, the cell only carries its row style.
    #[default]
    Empty,
    /// Boolean value.
    Bool(bool),
    /// Numeric value, must be finite.
    Number(f64),
    /// Text value.
    Text(String),
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Bool(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Number(v.into())
    }
}

impl From<u32> for Cell {
    fn from(v: u32) -> Self {
        Cell::Number(v.into())
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map_or(Cell::Empty, Into::into)
    }
}

/// A named table rendered as one sheet.
///
/// Rows and columns keep the order they were added in.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    /// Create an empty dataset with the sheet name and the column headers.
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push_row<I, C>(&mut self, row: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Append a row, builder style.
    pub fn with_row<I, C>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.push_row(row);
        self
    }

    /// Sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column headers.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows, without the header.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
