//! ファイルインデックス
//!
//! ドキュメントフォルダ内のファイル一覧を「キー → ファイル」の対応表にする。
//! 同じキーになるファイルが2つあればリンク先が決められないため、構築自体を失敗させる。

use crate::error::{Error, Result};
use crate::normalizer::{normalize, Key};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// フォルダ内の1ファイル
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// 拡張子付きファイル名
    pub file_name: String,
    /// 拡張子を除いたファイル名
    pub base_name: String,
}

impl FileEntry {
    pub fn new(file_name: impl Into<String>, base_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            base_name: base_name.into(),
        }
    }

    /// ファイル名から生成（最後の `.` 以降を拡張子とみなす）
    pub fn from_file_name(file_name: &str) -> Self {
        let base_name = match file_name.rfind('.') {
            Some(pos) if pos > 0 => &file_name[..pos],
            _ => file_name,
        };
        Self::new(file_name, base_name)
    }

    pub fn key(&self) -> Key {
        normalize(&self.base_name)
    }
}

/// キー → ファイルの対応表（構築後は読み取り専用）
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    entries: BTreeMap<Key, FileEntry>,
}

impl FileIndex {
    /// インデックスを構築
    ///
    /// # Errors
    /// 2つのファイルが同じキーに正規化された場合 `Error::DuplicateKey`
    pub fn build<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = FileEntry>,
    {
        let mut map = BTreeMap::new();

        for entry in entries {
            let key = entry.key();
            // 空キーはどのセルとも一致しないので登録しない
            if key.is_empty() {
                continue;
            }

            match map.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                Entry::Occupied(slot) => {
                    return Err(Error::DuplicateKey {
                        key: slot.key().to_string(),
                        first: slot.get().file_name.clone(),
                        second: entry.file_name,
                    });
                }
            }
        }

        Ok(Self { entries: map })
    }

    pub fn get(&self, key: &Key) -> Option<&FileEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// キー順に列挙
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Key, &FileEntry)> {
        self.entries.iter()
    }
}
