//! Pager record data structures.

/// Semantic role of a tagged fragment, decided by its class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Report time; opens a new record
    Date,
    /// Call classification, `call_type_1` through `call_type_9`
    CallType(u8),
    /// Incident description
    Message,
    /// Alerted units; closes the record
    Called,
}

impl FragmentKind {
    /// Every class label the extractor recognises.
    pub const CLASS_LABELS: [&'static str; 12] = [
        "date",
        "message",
        "called",
        "call_type_1",
        "call_type_2",
        "call_type_3",
        "call_type_4",
        "call_type_5",
        "call_type_6",
        "call_type_7",
        "call_type_8",
        "call_type_9",
    ];

    /// Map a class label to its fragment role.
    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "date" => Some(Self::Date),
            "message" => Some(Self::Message),
            "called" => Some(Self::Called),
            other => {
                let digit = other.strip_prefix("call_type_")?;
                match digit.parse::<u8>() {
                    Ok(n @ 1..=9) if digit.len() == 1 => Some(Self::CallType(n)),
                    _ => None,
                }
            }
        }
    }
}

/// A single tagged snippet of page markup, already stripped of tags.
///
/// Line breaks inside the element are kept as `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub text: String,
}

impl Fragment {
    /// Split the fragment text on its line separators, skipping empty pieces.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

/// One pager event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    /// Today's date prefix followed by the page's time text
    pub date: String,

    /// Free-text call classification
    pub call_type: String,

    /// Incident description; may span several lines
    pub message: String,

    /// Alerted units in order of appearance
    pub called: Vec<String>,
}

impl Record {
    /// Render the record as a display block.
    ///
    /// The first line carries the date and call type, then the message,
    /// then one line per called unit. Every line ends with `\n`.
    pub fn format(&self) -> String {
        let mut block = format!("{} - {}\n{}\n", self.date, self.call_type, self.message);
        for unit in &self.called {
            block.push_str(unit);
            block.push('\n');
        }
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_class() {
        assert_eq!(FragmentKind::from_class("date"), Some(FragmentKind::Date));
        assert_eq!(
            FragmentKind::from_class("call_type_7"),
            Some(FragmentKind::CallType(7))
        );
        assert_eq!(FragmentKind::from_class("call_type_0"), None);
        assert_eq!(FragmentKind::from_class("call_type_10"), None);
        assert_eq!(FragmentKind::from_class("footer"), None);
    }

    #[test]
    fn test_every_label_maps() {
        for label in FragmentKind::CLASS_LABELS {
            assert!(FragmentKind::from_class(label).is_some(), "{label}");
        }
    }

    #[test]
    fn test_fragment_lines() {
        let fragment = Fragment {
            kind: FragmentKind::Called,
            text: "Ambulance 13-101\n \nBrandweer 13-4531 ".to_string(),
        };
        let lines: Vec<_> = fragment.lines().collect();
        assert_eq!(lines, vec!["Ambulance 13-101", "Brandweer 13-4531"]);
    }

    #[test]
    fn test_format() {
        let record = Record {
            date: "Sun 18 October 2026, 14:02:11".to_string(),
            call_type: "Ambulance".to_string(),
            message: "A1 Amsterdam Rit 12345".to_string(),
            called: vec!["13-101".to_string(), "13-102".to_string()],
        };
        assert_eq!(
            record.format(),
            "Sun 18 October 2026, 14:02:11 - Ambulance\nA1 Amsterdam Rit 12345\n13-101\n13-102\n"
        );
    }
}
