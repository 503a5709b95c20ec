use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// ペグ（色などの記号）。名前の等価性のみが意味を持つ
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Peg(String);

impl Peg {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// ペグ名を取得
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Peg {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// ペグの順序付き列。シークレットと推測の両方に使う
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code {
    pegs: Vec<Peg>,
}

impl Code {
    pub fn new(pegs: Vec<Peg>) -> Self {
        Self { pegs }
    }

    /// ペグ名の列からコードを作成
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Peg::new).collect())
    }

    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    pub fn len(&self) -> usize {
        self.pegs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pegs.is_empty()
    }

    /// 利用可能なペグに含まれないペグを出現順に返す
    pub fn pegs_outside(&self, available: &BTreeSet<Peg>) -> Vec<Peg> {
        self.pegs
            .iter()
            .filter(|peg| !available.contains(*peg))
            .cloned()
            .collect()
    }

    /// ペグの集合（重複なし）
    pub fn to_set(&self) -> BTreeSet<Peg> {
        self.pegs.iter().cloned().collect()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.pegs.iter().map(Peg::name).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

impl FromIterator<Peg> for Code {
    fn from_iter<T: IntoIterator<Item = Peg>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// 試行として提出されたコード
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guess(Code);

impl Guess {
    pub fn new(code: Code) -> Self {
        Self(code)
    }

    pub fn code(&self) -> &Code {
        &self.0
    }
}

impl From<Code> for Guess {
    fn from(code: Code) -> Self {
        Self::new(code)
    }
}
