use crate::code::{Code, Peg};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// フィードバックの判定マーカー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackPeg {
    /// 位置も色も一致
    Exact,
    /// 色のみ一致（別の未消費の位置）
    Partial,
}

/// 推測に対する採点結果。EXACT が PARTIAL より先に並ぶ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feedback {
    pegs: Vec<FeedbackPeg>,
}

impl Feedback {
    /// 件数からフィードバックを作成
    pub fn from_counts(exact: usize, partial: usize) -> Self {
        let pegs = std::iter::repeat(FeedbackPeg::Exact)
            .take(exact)
            .chain(std::iter::repeat(FeedbackPeg::Partial).take(partial))
            .collect();
        Self { pegs }
    }

    /// シークレットに対して推測を採点する
    ///
    /// 完全一致した位置はシークレット側・推測側ともに消費済みとし、残りのペグは
    /// 多重集合として突き合わせる。シークレットの1つのペグが複数の推測ペグに
    /// 数えられることはない。長さの一致は呼び出し側で検証済みであること。
    pub fn score(secret: &Code, guess: &Code) -> Self {
        let mut exact = 0;
        let mut unconsumed: HashMap<&Peg, usize> = HashMap::new();
        let mut unmatched_guess = Vec::new();

        for (secret_peg, guess_peg) in secret.pegs().iter().zip(guess.pegs()) {
            if secret_peg == guess_peg {
                exact += 1;
            } else {
                *unconsumed.entry(secret_peg).or_insert(0) += 1;
                unmatched_guess.push(guess_peg);
            }
        }

        let mut partial = 0;
        for guess_peg in unmatched_guess {
            if let Some(remaining) = unconsumed.get_mut(guess_peg) {
                if *remaining > 0 {
                    *remaining -= 1;
                    partial += 1;
                }
            }
        }

        Self::from_counts(exact, partial)
    }

    pub fn pegs(&self) -> &[FeedbackPeg] {
        &self.pegs
    }

    /// EXACT マーカー数
    pub fn exact_hits(&self) -> usize {
        self.count(FeedbackPeg::Exact)
    }

    /// PARTIAL マーカー数
    pub fn partial_hits(&self) -> usize {
        self.count(FeedbackPeg::Partial)
    }

    pub fn len(&self) -> usize {
        self.pegs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pegs.is_empty()
    }

    fn count(&self, kind: FeedbackPeg) -> usize {
        self.pegs.iter().filter(|peg| **peg == kind).count()
    }
}
