//! PDF object model
//!
//! The small set of basic object types from the PDF Reference that the
//! renderer emits, plus a serializer that writes them in PDF syntax.

use std::collections::BTreeMap;
use std::io::{self, Write};

/// PDF object types
#[derive(Debug, Clone)]
pub enum PdfObject {
    /// Integer number
    Integer(i64),
    /// Real (floating-point) number
    Real(f64),
    /// Literal string enclosed in parentheses
    String(Vec<u8>),
    /// Name object (starts with /)
    Name(String),
    /// Array of objects
    Array(Vec<PdfObject>),
    /// Dictionary (key-value pairs)
    Dictionary(PdfDictionary),
    /// Stream (dictionary + byte data)
    Stream(PdfStream),
    /// Indirect reference (object number, generation number)
    Reference(u32, u16),
}

impl PdfObject {
    /// Create a name object
    pub fn name(s: impl Into<String>) -> Self {
        PdfObject::Name(s.into())
    }

    /// Create a literal string object
    pub fn string(s: &str) -> Self {
        PdfObject::String(s.as_bytes().to_vec())
    }
}

/// PDF dictionary (sorted key-value pairs)
#[derive(Debug, Clone, Default)]
pub struct PdfDictionary {
    entries: BTreeMap<String, PdfObject>,
}

impl PdfDictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key-value pair
    pub fn insert(&mut self, key: impl Into<String>, value: PdfObject) {
        self.entries.insert(key.into(), value);
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.get(key)
    }

    /// Check if dictionary contains a key
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over entries
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PdfObject)> {
        self.entries.iter()
    }

    /// Set the Type entry (common for PDF objects)
    pub fn with_type(mut self, type_name: &str) -> Self {
        self.insert("Type", PdfObject::Name(type_name.to_string()));
        self
    }
}

/// PDF stream (dictionary + data)
#[derive(Debug, Clone)]
pub struct PdfStream {
    /// Stream dictionary
    pub dict: PdfDictionary,
    /// Stream data (raw or pre-encoded)
    pub data: Vec<u8>,
    /// Whether the data is already encoded
    pub compressed: bool,
}

impl PdfStream {
    /// Create a new stream with data
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            dict: PdfDictionary::new(),
            data,
            compressed: false,
        }
    }
}

/// Serializer for PDF objects
pub struct PdfSerializer<W: Write> {
    writer: W,
}

impl<W: Write> PdfSerializer<W> {
    /// Create a new serializer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a PDF object
    pub fn write_object(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => write!(self.writer, "{}", n),
            PdfObject::Real(n) => {
                if n.fract() == 0.0 {
                    write!(self.writer, "{:.1}", n)
                } else {
                    let s = format!("{:.6}", n);
                    let s = s.trim_end_matches('0');
                    let s = s.trim_end_matches('.');
                    write!(self.writer, "{}", s)
                }
            }
            PdfObject::String(data) => self.write_string(data),
            PdfObject::Name(name) => self.write_name(name),
            PdfObject::Array(arr) => self.write_array(arr),
            PdfObject::Dictionary(dict) => self.write_dictionary(dict),
            PdfObject::Stream(stream) => self.write_stream(stream),
            PdfObject::Reference(obj_num, gen_num) => {
                write!(self.writer, "{} {} R", obj_num, gen_num)
            }
        }
    }

    /// Write a literal string with the required escapes
    fn write_string(&mut self, data: &[u8]) -> io::Result<()> {
        write!(self.writer, "(")?;
        for &byte in data {
            match byte {
                b'(' | b')' | b'\\' => {
                    write!(self.writer, "\\{}", byte as char)?;
                }
                0x0A => write!(self.writer, "\\n")?,
                0x0D => write!(self.writer, "\\r")?,
                0x09 => write!(self.writer, "\\t")?,
                0x08 => write!(self.writer, "\\b")?,
                0x0C => write!(self.writer, "\\f")?,
                0x20..=0x7E => write!(self.writer, "{}", byte as char)?,
                _ => write!(self.writer, "\\{:03o}", byte)?,
            }
        }
        write!(self.writer, ")")
    }

    /// Write a PDF name, escaping delimiters as #XX
    fn write_name(&mut self, name: &str) -> io::Result<()> {
        write!(self.writer, "/")?;
        for byte in name.bytes() {
            match byte {
                0x21..=0x7E
                    if byte != b'#'
                        && byte != b'('
                        && byte != b')'
                        && byte != b'<'
                        && byte != b'>'
                        && byte != b'['
                        && byte != b']'
                        && byte != b'{'
                        && byte != b'}'
                        && byte != b'/'
                        && byte != b'%' =>
                {
                    write!(self.writer, "{}", byte as char)?;
                }
                _ => write!(self.writer, "#{:02X}", byte)?,
            }
        }
        Ok(())
    }

    fn write_array(&mut self, arr: &[PdfObject]) -> io::Result<()> {
        write!(self.writer, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(self.writer, " ")?;
            }
            self.write_object(obj)?;
        }
        write!(self.writer, "]")
    }

    fn write_dictionary(&mut self, dict: &PdfDictionary) -> io::Result<()> {
        write!(self.writer, "<<")?;
        for (key, value) in dict.iter() {
            write!(self.writer, " ")?;
            self.write_name(key)?;
            write!(self.writer, " ")?;
            self.write_object(value)?;
        }
        write!(self.writer, " >>")
    }

    fn write_stream(&mut self, stream: &PdfStream) -> io::Result<()> {
        self.write_dictionary(&stream.dict)?;
        write!(self.writer, "\nstream\n")?;
        self.writer.write_all(&stream.data)?;
        write!(self.writer, "\nendstream")
    }

    /// Consume the serializer and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialize(obj: &PdfObject) -> String {
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(obj).unwrap();
        String::from_utf8(serializer.into_inner()).unwrap()
    }

    #[test]
    fn test_serialize_numbers() {
        assert_eq!(serialize(&PdfObject::Integer(42)), "42");
        assert_eq!(serialize(&PdfObject::Real(3.14159)), "3.14159");
        assert_eq!(serialize(&PdfObject::Real(2.0)), "2.0");
    }

    #[test]
    fn test_serialize_string_escapes() {
        assert_eq!(serialize(&PdfObject::string("Hello")), "(Hello)");
        assert_eq!(serialize(&PdfObject::string("a(b)c")), "(a\\(b\\)c)");
        assert_eq!(serialize(&PdfObject::string("tab\there")), "(tab\\there)");
        // Non-ASCII bytes come out as octal escapes
        assert_eq!(serialize(&PdfObject::String(vec![0xE8])), "(\\350)");
    }

    #[test]
    fn test_serialize_name() {
        assert_eq!(serialize(&PdfObject::name("Type")), "/Type");
        assert_eq!(serialize(&PdfObject::name("A B")), "/A#20B");
    }

    #[test]
    fn test_serialize_array() {
        let arr = PdfObject::Array(vec![
            PdfObject::Integer(1),
            PdfObject::Integer(2),
            PdfObject::Integer(3),
        ]);
        assert_eq!(serialize(&arr), "[1 2 3]");
    }

    #[test]
    fn test_serialize_dictionary() {
        let mut dict = PdfDictionary::new();
        dict.insert("Type", PdfObject::name("Page"));
        let result = serialize(&PdfObject::Dictionary(dict));
        assert!(result.contains("/Type"));
        assert!(result.contains("/Page"));
    }

    #[test]
    fn test_serialize_reference() {
        assert_eq!(serialize(&PdfObject::Reference(1, 0)), "1 0 R");
    }

    #[test]
    fn test_serialize_stream() {
        let stream = PdfStream::new(b"BT ET".to_vec());
        let result = serialize(&PdfObject::Stream(stream));
        assert!(result.contains("stream\nBT ET\nendstream"));
    }
}
