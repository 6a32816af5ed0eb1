//! xCDN document model.
//!
//! A parsed document is a prolog of directives followed by a stream of
//! nodes. A node is a value plus its `#tags` and `@annotations`. Everything
//! is exclusively owned down the tree, so dropping a [`Document`] releases
//! the whole structure.

use indexmap::IndexMap;
use std::fmt;

/// An xCDN value.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// 64-bit floating-point number.
    Float(f64),
    /// Arbitrary-precision decimal `d"..."`, kept as text.
    Decimal(String),
    /// UTF-8 string.
    String(String),
    /// Byte array decoded from `b"..."`.
    Bytes(Vec<u8>),
    /// RFC3339 datetime `t"..."`, kept as text.
    DateTime(String),
    /// ISO8601 duration `r"..."`, kept as text.
    Duration(String),
    /// UUID `u"..."`, kept as validated text.
    Uuid(String),
    /// Array of nodes.
    Array(Vec<Node>),
    /// Object: an insertion-ordered map from key to node.
    Object(IndexMap<String, Node>),
}

impl Value {
    /// Returns `true` if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float value if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the stored text for any text-shaped variant: `String`,
    /// `Decimal`, `DateTime`, `Duration`, or `Uuid`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s)
            | Value::Decimal(s)
            | Value::DateTime(s)
            | Value::Duration(s)
            | Value::Uuid(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the bytes if this is a `Bytes`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns a reference to the elements if this is an `Array`.
    pub fn as_array(&self) -> Option<&Vec<Node>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns a mutable reference to the elements if this is an `Array`.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns a reference to the entries if this is an `Object`.
    pub fn as_object(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns a mutable reference to the entries if this is an `Object`.
    pub fn as_object_mut(&mut self) -> Option<&mut IndexMap<String, Node>> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// The name of this value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::DateTime(_) => "datetime",
            Value::Duration(_) => "duration",
            Value::Uuid(_) => "uuid",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => {
                if n.is_nan() {
                    write!(f, "nan")
                } else if n.is_infinite() {
                    if *n > 0.0 {
                        write!(f, "infinity")
                    } else {
                        write!(f, "-infinity")
                    }
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Decimal(s) => write!(f, "d\"{}\"", s),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Bytes(b) => {
                write!(f, "b<")?;
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                write!(f, ">")
            }
            Value::DateTime(s) => write!(f, "t\"{}\"", s),
            Value::Duration(s) => write!(f, "r\"{}\"", s),
            Value::Uuid(s) => write!(f, "u\"{}\"", s),
            Value::Array(items) => f.debug_list().entries(items).finish(),
            Value::Object(entries) => f.debug_map().entries(entries).finish(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Node>> for Value {
    fn from(items: Vec<Node>) -> Self {
        Value::Array(items)
    }
}

impl From<IndexMap<String, Node>> for Value {
    fn from(entries: IndexMap<String, Node>) -> Self {
        Value::Object(entries)
    }
}

/// An annotation: a named decoration with an ordered argument list.
///
/// Arguments are plain [`Value`]s; they cannot themselves carry tags or
/// annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: String,
    pub args: Vec<Value>,
}

impl Annotation {
    /// Create an annotation with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Annotation {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument value.
    pub fn push_arg(&mut self, value: Value) {
        self.args.push(value);
    }

    /// Get the argument at index `i`.
    pub fn arg(&self, i: usize) -> Option<&Value> {
        self.args.get(i)
    }

    /// Number of arguments.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

/// A value enriched with its ordered `#tags` and `@annotations`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub tags: Vec<String>,
    pub annotations: Vec<Annotation>,
    pub value: Value,
}

impl Node {
    /// Create a bare node wrapping a value.
    pub fn new(value: Value) -> Self {
        Node {
            tags: Vec::new(),
            annotations: Vec::new(),
            value,
        }
    }

    /// Append a tag.
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Append an annotation.
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Returns `true` if this node carries a tag with the given name.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    /// Get the tag at index `i`.
    pub fn tag_at(&self, i: usize) -> Option<&str> {
        self.tags.get(i).map(String::as_str)
    }

    /// Number of tags.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Find the first annotation with the given name.
    pub fn find_annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }

    /// Returns `true` if this node carries an annotation with the given name.
    pub fn has_annotation(&self, name: &str) -> bool {
        self.find_annotation(name).is_some()
    }

    /// Number of annotations.
    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::new(value)
    }
}

/// A prolog directive, e.g. `$schema: "..."`.
///
/// The name omits the leading `$`; the value carries no decorations.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub value: Value,
}

/// A whole xCDN document: prolog directives plus a stream of top-level
/// nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub prolog: Vec<Directive>,
    pub values: Vec<Node>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Document::default()
    }

    /// Append a top-level node.
    pub fn push_value(&mut self, node: Node) {
        self.values.push(node);
    }

    /// Append a prolog directive.
    pub fn push_directive(&mut self, name: impl Into<String>, value: Value) {
        self.prolog.push(Directive {
            name: name.into(),
            value,
        });
    }

    /// Get the top-level node at index `i`.
    pub fn get(&self, i: usize) -> Option<&Node> {
        self.values.get(i)
    }

    /// Look up a key in the first top-level value, when it is an object.
    pub fn get_key(&self, key: &str) -> Option<&Node> {
        self.values.first()?.value.as_object()?.get(key)
    }

    /// Returns `true` if the first top-level object has the given key.
    pub fn has_key(&self, key: &str) -> bool {
        self.get_key(key).is_some()
    }

    /// Walk a dot-separated path through nested objects, starting at the
    /// first top-level value. Returns `None` if any segment is missing or
    /// lands on a non-object.
    pub fn get_path(&self, path: &str) -> Option<&Node> {
        let mut current = self.values.first()?;
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            current = current.value.as_object()?.get(segment)?;
        }
        Some(current)
    }
}
