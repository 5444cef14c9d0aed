/// How a reference segment is reached from the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// `a.b` - relational / nested field access
    Dot,
    /// `a->b` - JSON path access
    Arrow,
}

impl Accessor {
    pub fn as_str(self) -> &'static str {
        match self {
            Accessor::Dot => ".",
            Accessor::Arrow => "->",
        }
    }
}

/// A multi-segment name such as `profile.age` or `data->owner->name`.
///
/// References always carry at least two names; a single name is an
/// identifier. Segments reached through `.` always precede those reached
/// through `->`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub head: String,
    pub segments: Vec<(Accessor, String)>,
}

impl Reference {
    pub fn new(head: impl Into<String>, segments: Vec<(Accessor, String)>) -> Self {
        Reference {
            head: head.into(),
            segments,
        }
    }

    /// All names in order, head first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.head.as_str()).chain(self.segments.iter().map(|(_, n)| n.as_str()))
    }

    /// True if any segment is reached through `->`.
    pub fn is_json_path(&self) -> bool {
        self.segments.iter().any(|(a, _)| *a == Accessor::Arrow)
    }
}
