//! Object-type member extraction.
//!
//! Reducer-style builtins need the member names of the state object, and the
//! oracle only hands back a display string like
//! `{ count: number; step: number }`. A full type parse is out of scope; a
//! balanced-delimiter scan over the display string is enough for the names.
//!
//! The scanner splits on top-level `;` and `,`, tracking `{}`/`()`/`[]`/`<>`
//! depth so nested object and function types stay intact. A `>` with no open
//! `<` is an arrow tail (`=>`), not a closer.

use riviere_socle::String;

/// One member of an object-shaped type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMember {
    /// Member name, trimmed, optional-marker stripped (`count?` -> `count`).
    pub name: String,
    /// Member type text, trimmed.
    pub type_text: String,
}

#[derive(Debug, Default)]
struct Depth {
    curly: i32,
    paren: i32,
    bracket: i32,
    angle: i32,
}

impl Depth {
    fn step(&mut self, b: u8) {
        match b {
            b'{' => self.curly += 1,
            b'}' => self.curly -= 1,
            b'(' => self.paren += 1,
            b')' => self.paren -= 1,
            b'[' => self.bracket += 1,
            b']' => self.bracket -= 1,
            b'<' => self.angle += 1,
            // `>` without an open `<` is an arrow tail, not a closer
            b'>' if self.angle > 0 => self.angle -= 1,
            _ => {}
        }
    }

    fn at_top(&self) -> bool {
        self.curly == 0 && self.paren == 0 && self.bracket == 0 && self.angle == 0
    }
}

/// Split an object-shaped type display string into its members.
///
/// Returns an empty vector when the string is not brace-wrapped or has no
/// members. Nested braces, parens, brackets and angle brackets are balanced;
/// a member whose type is itself an object keeps its full text.
pub fn split_object_members(type_str: &str) -> Vec<ObjectMember> {
    let trimmed = type_str.trim();
    let Some(inner) = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return Vec::new();
    };

    let mut members = Vec::new();
    let mut depth = Depth::default();
    let mut start = 0usize;

    for (i, &b) in inner.as_bytes().iter().enumerate() {
        if (b == b';' || b == b',') && depth.at_top() {
            push_member(&mut members, &inner[start..i]);
            start = i + 1;
        } else {
            depth.step(b);
        }
    }
    push_member(&mut members, &inner[start..]);

    members
}

fn push_member(members: &mut Vec<ObjectMember>, segment: &str) {
    let segment = segment.trim();
    if segment.is_empty() {
        return;
    }

    // Name ends at the first top-level colon; methods like `reset(): void`
    // end at their parameter list instead.
    let mut depth = Depth::default();
    let mut split = segment.len();
    for (i, &b) in segment.as_bytes().iter().enumerate() {
        if depth.at_top() && (b == b':' || b == b'(') {
            split = i;
            break;
        }
        depth.step(b);
    }

    let name = segment[..split].trim().trim_end_matches('?').trim();
    if name.is_empty() {
        return;
    }
    let type_text = segment[split..].trim_start_matches(':').trim();

    members.push(ObjectMember {
        name: String::new(name),
        type_text: String::new(type_text),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(type_str: &str) -> Vec<std::string::String> {
        split_object_members(type_str)
            .into_iter()
            .map(|m| m.name.to_string())
            .collect()
    }

    #[test]
    fn test_flat_object() {
        assert_eq!(
            names("{ count: number; step: number }"),
            vec!["count", "step"]
        );
    }

    #[test]
    fn test_comma_separated() {
        assert_eq!(names("{ a: string, b: boolean }"), vec!["a", "b"]);
    }

    #[test]
    fn test_nested_object_stays_whole() {
        let members =
            split_object_members("{ user: { name: string; age: number }; active: boolean }");
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name.as_str(), "user");
        assert_eq!(
            members[0].type_text.as_str(),
            "{ name: string; age: number }"
        );
        assert_eq!(members[1].name.as_str(), "active");
    }

    #[test]
    fn test_arrow_members_do_not_split() {
        let members =
            split_object_members("{ increment: () => void; decrement: (by: number) => void }");
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name.as_str(), "increment");
        assert_eq!(members[0].type_text.as_str(), "() => void");
        assert_eq!(members[1].name.as_str(), "decrement");
    }

    #[test]
    fn test_generic_member() {
        let members = split_object_members("{ items: Array<string>; load: () => void }");
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].type_text.as_str(), "Array<string>");
    }

    #[test]
    fn test_method_shorthand() {
        let members = split_object_members("{ reset(): void }");
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name.as_str(), "reset");
    }

    #[test]
    fn test_optional_marker_stripped() {
        assert_eq!(names("{ label?: string }"), vec!["label"]);
    }

    #[test]
    fn test_not_an_object() {
        assert!(split_object_members("number").is_empty());
        assert!(split_object_members("() => void").is_empty());
    }

    #[test]
    fn test_empty_object() {
        assert!(split_object_members("{}").is_empty());
        assert!(split_object_members("{   }").is_empty());
    }

    // The scanner does not understand string-literal contents; a delimiter
    // inside a literal type splits the member. Pinned so a future fix is a
    // conscious contract change.
    #[test]
    fn test_string_literal_delimiters_split_members() {
        let members = split_object_members(r#"{ sep: ";"; kind: string }"#);
        assert_eq!(members.len(), 3);
        assert_eq!(members[0].name.as_str(), "sep");
    }
}
