use crate::extract::RowMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(String),
    Rows(Vec<RowMap>),
}

/// A Cypher statement with its parameters, independent of any driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub cypher: String,
    pub params: Vec<(String, Param)>,
}

impl Statement {
    pub fn new(cypher: impl Into<String>) -> Self {
        Self {
            cypher: cypher.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: Param) -> Self {
        self.params.push((key.to_string(), value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Param> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub sheets: usize,
    pub rows: usize,
    pub statements: usize,
}
