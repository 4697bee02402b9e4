use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Segment of a model path
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Argument or input field: `.name`
    Property(String),
    /// List row: `[0]`
    Index(usize),
    /// Any row of a list, used while resolving item types: `[*]`
    ArrayWildcard,
}

/// Location of a value inside a form model, e.g. `workflows[0]` or
/// `settings.cyclePoint`
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    pub fn root() -> Self {
        Self { segments: vec![] }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn push_property(&self, name: &str) -> Self {
        let mut new = self.clone();
        new.segments.push(PathSegment::Property(name.to_string()));
        new
    }

    pub fn push_index(&self, idx: usize) -> Self {
        let mut new = self.clone();
        new.segments.push(PathSegment::Index(idx));
        new
    }

    pub fn push_wildcard(&self) -> Self {
        let mut new = self.clone();
        new.segments.push(PathSegment::ArrayWildcard);
        new
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    pub fn parent(&self) -> Self {
        let mut new = self.clone();
        new.segments.pop();
        new
    }

    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Parse `a.b[0].c` notation; malformed brackets are skipped
    pub fn parse(s: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = s.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if !current.is_empty() {
                        segments.push(PathSegment::Property(std::mem::take(&mut current)));
                    }
                }
                '[' => {
                    if !current.is_empty() {
                        segments.push(PathSegment::Property(std::mem::take(&mut current)));
                    }
                    let index_str: String = chars.by_ref().take_while(|&c| c != ']').collect();
                    if index_str == "*" {
                        segments.push(PathSegment::ArrayWildcard);
                    } else if let Ok(idx) = index_str.parse::<usize>() {
                        segments.push(PathSegment::Index(idx));
                    }
                }
                _ => current.push(ch),
            }
        }

        if !current.is_empty() {
            segments.push(PathSegment::Property(current));
        }

        Self { segments }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                PathSegment::Property(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Property(name) => write!(f, ".{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
                PathSegment::ArrayWildcard => write!(f, "[*]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for PropertyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PropertyPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_path_building() {
        let path = PropertyPath::root()
            .push_property("settings")
            .push_property("cyclePoint");

        assert_eq!(path.to_string(), "settings.cyclePoint");
        assert_eq!(path.depth(), 2);
        assert_eq!(path.parent().to_string(), "settings");
    }

    #[test]
    fn test_property_path_with_rows() {
        let path = PropertyPath::root().push_property("workflows").push_index(0);
        assert_eq!(path.to_string(), "workflows[0]");

        let item = PropertyPath::root().push_property("tasks").push_wildcard();
        assert_eq!(item.to_string(), "tasks[*]");
    }

    #[test]
    fn test_property_path_parse() {
        let path = PropertyPath::parse("settings[1].cyclePoint");
        assert_eq!(path.depth(), 3);
        assert_eq!(path.last(), Some(&PathSegment::Property("cyclePoint".into())));
        assert_eq!(path.to_string(), "settings[1].cyclePoint");

        assert!(PropertyPath::parse("").is_root());
    }
}
