use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};

// キーは小文字にしたキーワード
// 同じキーは 1 度しか設定できない、順番は書かれた順
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn new() -> Self {
        Metadata {
            entries: Vec::new(),
        }
    }

    // 既にあるキーなら何も変えず、先に設定された値を返す
    pub fn insert_once(&mut self, keyword: &str, value: &str) -> Result<(), &str> {
        let key = keyword.to_lowercase();

        if let Some(position) = self.position(&key) {
            return Err(self.entries[position].1.as_str());
        }

        self.entries.push((key, value.to_owned()));
        Ok(())
    }

    pub fn get(&self, keyword: &str) -> Option<&str> {
        self.position(&keyword.to_lowercase())
            .map(|position| self.entries[position].1.as_str())
    }

    pub fn contains_key(&self, keyword: &str) -> bool {
        self.get(keyword).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// 重複したキーはエラーにする
impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::{Error, MapAccess, Visitor};

        struct MetadataVisitor;

        impl<'de> Visitor<'de> for MetadataVisitor {
            type Value = Metadata;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map of metadata strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Metadata, A::Error> {
                let mut metadata = Metadata::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    metadata
                        .insert_once(&key, &value)
                        .map_err(|_| A::Error::custom(format!("duplicate metadata {:?}", key)))?;
                }
                Ok(metadata)
            }
        }

        deserializer.deserialize_map(MetadataVisitor)
    }
}
