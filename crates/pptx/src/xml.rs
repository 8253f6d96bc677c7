//! Small helpers shared by the XML readers.

use quick_xml::events::BytesStart;

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Look up an attribute by its exact (prefixed) name, unescaping the value.
pub(crate) fn attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_attr_unescapes() {
        let mut reader = Reader::from_str(r#"<a:hlinkClick r:id="rId3" tooltip="A &amp; B"/>"#);
        let event = reader.read_event().unwrap();
        let Event::Empty(e) = event else {
            panic!("expected empty element");
        };
        assert_eq!(attr(&e, b"r:id").as_deref(), Some("rId3"));
        assert_eq!(attr(&e, b"tooltip").as_deref(), Some("A & B"));
        assert_eq!(attr(&e, b"id"), None);
    }
}
