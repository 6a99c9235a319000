use crate::application::read_models::{TreeNodeView, TreeSnapshot};
use crate::ports::outbound::TreeFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";
const TRUNCATED: &str = " …";

/// TextTreeFormatter adapter rendering the snapshot as an indented tree
///
/// With colors enabled, labels are painted in their annotation color using
/// 24-bit terminal colors. Without, the color name follows the label in
/// parentheses so the annotation is still visible in plain text.
pub struct TextTreeFormatter {
    colored: bool,
    icons: bool,
}

impl TextTreeFormatter {
    pub fn new(colored: bool, icons: bool) -> Self {
        Self { colored, icons }
    }

    fn line(&self, node: &TreeNodeView) -> String {
        let mut line = String::new();
        if self.icons {
            if let Some(icon) = &node.icon {
                line.push_str(&format!("[{}] ", icon));
            }
        }
        match node.color {
            Some(color) if self.colored => {
                let (r, g, b) = color.rgb();
                line.push_str(&node.label.truecolor(r, g, b).to_string());
            }
            Some(color) => line.push_str(&format!("{} ({})", node.label, color)),
            None => line.push_str(&node.label),
        }
        if node.truncated {
            line.push_str(TRUNCATED);
        }
        line
    }

    fn render_children(&self, node: &TreeNodeView, prefix: &str, output: &mut String) {
        let last = node.children.len().saturating_sub(1);
        for (i, child) in node.children.iter().enumerate() {
            let (branch, indent) = if i == last {
                (LAST_BRANCH, SPACE)
            } else {
                (BRANCH, PIPE)
            };
            output.push_str(prefix);
            output.push_str(branch);
            output.push_str(&self.line(child));
            output.push('\n');
            self.render_children(child, &format!("{}{}", prefix, indent), output);
        }
    }
}

impl TreeFormatter for TextTreeFormatter {
    fn format(&self, snapshot: &TreeSnapshot) -> Result<String> {
        let mut output = String::new();
        for (i, root) in snapshot.roots.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&self.line(root));
            output.push('\n');
            self.render_children(root, "", &mut output);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::SnapshotMetadata;
    use crate::explorer::domain::Color;

    fn node(label: &str, children: Vec<TreeNodeView>) -> TreeNodeView {
        TreeNodeView {
            label: label.to_string(),
            icon: None,
            color: None,
            truncated: false,
            children,
        }
    }

    fn snapshot(roots: Vec<TreeNodeView>) -> TreeSnapshot {
        TreeSnapshot {
            metadata: SnapshotMetadata::new(None, None, true, 3),
            roots,
        }
    }

    #[test]
    fn test_format_tree_drawing() {
        let mut numpy = node("python3-numpy", vec![]);
        numpy.truncated = true;
        let scipy = node("python3-scipy", vec![numpy, node("glibc", vec![])]);
        let root = node("workset", vec![scipy, node("bash", vec![])]);

        let output = TextTreeFormatter::new(false, false)
            .format(&snapshot(vec![root]))
            .unwrap();

        let expected = "workset\n\
                        ├── python3-scipy\n\
                        │   ├── python3-numpy …\n\
                        │   └── glibc\n\
                        └── bash\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_plain_output_names_colors() {
        let mut wl = node("SciPy stack", vec![]);
        wl.color = Some(Color::Selected);
        let output = TextTreeFormatter::new(false, false)
            .format(&snapshot(vec![node("sources", vec![wl])]))
            .unwrap();
        assert!(output.contains("SciPy stack (selected)"));
    }

    #[test]
    fn test_colored_output_uses_truecolor() {
        let mut wl = node("SciPy stack", vec![]);
        wl.color = Some(Color::Unwanted);
        let output = TextTreeFormatter::new(true, false)
            .format(&snapshot(vec![wl]))
            .unwrap();
        assert!(output.contains("\u{1b}[38;2;255;0;0m"));
        assert!(!output.contains("(unwanted)"));
    }

    #[test]
    fn test_icons() {
        let mut root = node("workset", vec![]);
        root.icon = Some("briefcase".to_string());
        let formatter = TextTreeFormatter::new(false, true);
        let output = formatter.format(&snapshot(vec![root.clone()])).unwrap();
        assert_eq!(output, "[briefcase] workset\n");

        let output = TextTreeFormatter::new(false, false)
            .format(&snapshot(vec![root]))
            .unwrap();
        assert_eq!(output, "workset\n");
    }

    #[test]
    fn test_roots_separated_by_blank_line() {
        let output = TextTreeFormatter::new(false, false)
            .format(&snapshot(vec![node("sources", vec![]), node("labels", vec![])]))
            .unwrap();
        assert_eq!(output, "sources\n\nlabels\n");
    }
}
