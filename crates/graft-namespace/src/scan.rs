//! Namespace inventory builder
//!
//! Walks each document as a stream of XML events and records every
//! namespace bound on an element. Any malformed document fails the whole
//! scan: a partial inventory would let extension resolution silently miss
//! a required handler.

use crate::error::ScanError;
use crate::resource::Resource;
use graft_model::NamespaceInventory;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

/// Build the namespace inventory of a batch of documents
///
/// # Errors
/// Returns the first [`ScanError`] encountered
pub fn scan_documents(documents: &[Resource]) -> Result<NamespaceInventory, ScanError> {
    let mut inventory = NamespaceInventory::new();
    for document in documents {
        scan_document(document, &mut inventory)?;
    }
    tracing::debug!(
        "Scanned {} document(s), {} namespace(s) in use",
        documents.len(),
        inventory.len()
    );
    Ok(inventory)
}

/// Add the namespaces bound in one document to `inventory`
///
/// Nothing is added unless the whole document is well-formed.
///
/// # Errors
/// Returns error if the document is not well-formed
pub fn scan_document(
    document: &Resource,
    inventory: &mut NamespaceInventory,
) -> Result<(), ScanError> {
    let location = document.location();
    let mut reader = NsReader::from_reader(document.bytes());
    let mut buf = Vec::new();
    let mut found = NamespaceInventory::new();
    let mut depth = 0usize;
    let mut root_closed = false;

    loop {
        let position = reader.buffer_position() as u64;
        let (resolved, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| ScanError::malformed(location, position, e.to_string()))?;

        match event {
            Event::Eof => break,
            Event::Start(ref element) | Event::Empty(ref element) => {
                if root_closed {
                    return Err(ScanError::MultipleRoots {
                        location: location.to_string(),
                        position,
                    });
                }
                if let ResolveResult::Unknown(prefix) = resolved {
                    return Err(ScanError::UnboundPrefix {
                        location: location.to_string(),
                        prefix: String::from_utf8_lossy(&prefix).into_owned(),
                    });
                }
                collect_bindings(element, location, position, &mut found)?;
                if matches!(event, Event::Start(_)) {
                    depth += 1;
                } else if depth == 0 {
                    root_closed = true;
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                root_closed = depth == 0;
            }
            Event::Text(ref text) if depth == 0 => {
                if text.iter().any(|b| !b.is_ascii_whitespace()) {
                    return Err(ScanError::ContentOutsideRoot {
                        location: location.to_string(),
                        position,
                    });
                }
            }
            Event::CData(_) if depth == 0 => {
                return Err(ScanError::ContentOutsideRoot {
                    location: location.to_string(),
                    position,
                });
            }
            _ => {}
        }
        buf.clear();
    }

    if !root_closed && depth == 0 {
        return Err(ScanError::NoRootElement {
            location: location.to_string(),
        });
    }
    if depth > 0 {
        return Err(ScanError::UnclosedElement {
            location: location.to_string(),
            depth,
        });
    }
    for namespace in found.iter() {
        inventory.insert(namespace);
    }
    Ok(())
}

fn collect_bindings(
    element: &BytesStart<'_>,
    location: &str,
    position: u64,
    found: &mut NamespaceInventory,
) -> Result<(), ScanError> {
    for attribute in element.attributes() {
        let attribute =
            attribute.map_err(|e| ScanError::malformed(location, position, e.to_string()))?;
        if attribute.key.as_namespace_binding().is_none() {
            continue;
        }
        let uri = attribute
            .unescape_value()
            .map_err(|e| ScanError::malformed(location, position, e.to_string()))?;
        // xmlns="" undeclares the default namespace
        if !uri.is_empty() {
            found.insert(uri.into_owned());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUEPRINT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<blueprint xmlns="http://www.osgi.org/xmlns/blueprint/v1.0.0"
           xmlns:cm="http://aries.apache.org/blueprint/xmlns/blueprint-cm/v1.1.0">
  <cm:property-placeholder persistent-id="acme">
    <cm:default-properties>
      <cm:property name="greeting" value="hi"/>
    </cm:default-properties>
  </cm:property-placeholder>
  <bean id="a" class="com.acme.A"
        xmlns:ext="http://aries.apache.org/blueprint/xmlns/blueprint-ext/v1.0.0"/>
</blueprint>
"#;

    fn doc(location: &str, text: &str) -> Resource {
        Resource::from_bytes(location, text.as_bytes().to_vec())
    }

    #[test]
    fn collects_bindings_on_all_elements() {
        let inventory = scan_documents(&[doc("blueprint.xml", BLUEPRINT)]).unwrap();
        let all: Vec<_> = inventory.iter().collect();
        assert_eq!(
            all,
            vec![
                "http://aries.apache.org/blueprint/xmlns/blueprint-cm/v1.1.0",
                "http://aries.apache.org/blueprint/xmlns/blueprint-ext/v1.0.0",
                "http://www.osgi.org/xmlns/blueprint/v1.0.0",
            ]
        );
    }

    #[test]
    fn merges_across_documents() {
        let first = doc("one.xml", r#"<root xmlns="urn:one"/>"#);
        let second = doc("two.xml", r#"<root xmlns="urn:one" xmlns:t="urn:two"><t:x/></root>"#);
        let inventory = scan_documents(&[first, second]).unwrap();
        assert_eq!(inventory.len(), 2);
        assert!(inventory.contains("urn:two"));
    }

    #[test]
    fn ignores_default_namespace_undeclaration() {
        let inventory =
            scan_documents(&[doc("a.xml", r#"<root xmlns="urn:a"><child xmlns=""/></root>"#)])
                .unwrap();
        assert_eq!(inventory.iter().collect::<Vec<_>>(), vec!["urn:a"]);
    }

    #[test]
    fn plain_attributes_are_not_namespaces() {
        let inventory =
            scan_documents(&[doc("a.xml", r#"<root id="urn:not-a-namespace"/>"#)]).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn unclosed_element_fails_whole_scan() {
        let good = doc("good.xml", r#"<root xmlns="urn:a"/>"#);
        let bad = doc("bad.xml", r#"<root xmlns="urn:b"><child>"#);
        let err = scan_documents(&[good, bad]).unwrap_err();
        assert!(matches!(
            err,
            ScanError::UnclosedElement { ref location, .. } if location == "bad.xml"
        ));
    }

    #[test]
    fn document_without_elements_fails() {
        let err = scan_documents(&[doc("empty.xml", "<?xml version=\"1.0\"?>\n<!-- none -->\n")])
            .unwrap_err();
        assert!(matches!(err, ScanError::NoRootElement { .. }));
    }

    #[test]
    fn second_root_element_fails() {
        let err = scan_documents(&[doc("two.xml", r#"<a xmlns="urn:a"/><b xmlns="urn:b"/>"#)])
            .unwrap_err();
        assert!(matches!(
            err,
            ScanError::MultipleRoots { ref location, .. } if location == "two.xml"
        ));

        let err = scan_documents(&[doc("two.xml", r#"<a xmlns="urn:a"></a><b/>"#)]).unwrap_err();
        assert!(matches!(err, ScanError::MultipleRoots { .. }));
    }

    #[test]
    fn text_outside_root_fails() {
        for text in [
            "just text",
            r#"garbage<a xmlns="urn:a"/>"#,
            r#"<a xmlns="urn:a"/>trailing"#,
            r#"<a xmlns="urn:a"></a><![CDATA[x]]>"#,
        ] {
            let err = scan_documents(&[doc("text.xml", text)]).unwrap_err();
            assert!(
                matches!(err, ScanError::ContentOutsideRoot { .. }),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn whitespace_and_comments_around_root_are_fine() {
        let text = "<?xml version=\"1.0\"?>\n<!-- head -->\n<a xmlns=\"urn:a\"/>\n<!-- tail -->\n";
        let inventory = scan_documents(&[doc("ok.xml", text)]).unwrap();
        assert_eq!(inventory.iter().collect::<Vec<_>>(), vec!["urn:a"]);
    }

    #[test]
    fn undeclared_element_prefix_fails() {
        let err = scan_documents(&[doc("prefix.xml", r#"<a xmlns="urn:a"><cm:x/></a>"#)])
            .unwrap_err();
        assert!(matches!(err, ScanError::UnboundPrefix { ref prefix, .. } if prefix == "cm"));
    }

    #[test]
    fn failed_document_adds_nothing() {
        let mut inventory = NamespaceInventory::new();
        let bad = doc("bad.xml", r#"<a xmlns="urn:a"><b xmlns="urn:b"/>"#);
        assert!(scan_document(&bad, &mut inventory).is_err());
        assert!(inventory.is_empty());
    }
}
