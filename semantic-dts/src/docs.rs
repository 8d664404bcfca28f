//! Documentation extraction. Doc blocks are not part of the token stream; they are recovered
//! from the raw unit text using node locations.

use parse_dts::loc::Loc;

/// Returns the cleaned text of a `/** … */` block immediately preceding `loc`, separated from it
/// by whitespace only.
pub(crate) fn doc_for_node(text: &str, loc: Loc) -> Option<String> {
  let before = text.get(..loc.0)?;
  let trimmed = before.trim_end();
  if !trimmed.ends_with("*/") {
    return None;
  };
  let start = trimmed.rfind("/**")?;
  let block = &trimmed[start..];
  // A stray `*/` inside the candidate range means the trailing `*/` closed a different comment.
  if block.len() >= 5 && block[3..block.len() - 2].contains("*/") {
    return None;
  };
  clean_block(block)
}

/// Returns the cleaned text of the last `/** … */` block anywhere before `end`. Used as the
/// file-level fallback for a unit's first interface only.
pub(crate) fn file_level_doc(text: &str, end: usize) -> Option<String> {
  let region = text.get(..end)?;
  let start = region.rfind("/**")?;
  let close = region[start..].find("*/")?;
  clean_block(&region[start..start + close + 2])
}

/// Strips the comment delimiters and the leading `*` gutter of each line.
fn clean_block(block: &str) -> Option<String> {
  let inner = block.strip_prefix("/**")?.strip_suffix("*/")?;
  let cleaned = inner
    .split('\n')
    .map(|line| {
      let stripped = line.trim_start();
      match stripped.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
      }
    })
    .collect::<Vec<_>>()
    .join("\n");
  let cleaned = cleaned.trim();
  if cleaned.is_empty() {
    None
  } else {
    Some(cleaned.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::clean_block;
  use super::doc_for_node;
  use super::file_level_doc;
  use parse_dts::loc::Loc;

  #[test]
  fn finds_block_immediately_before_node() {
    let text = "/** Summary line. */\ninterface Foo {}";
    let start = text.find("interface").unwrap();
    assert_eq!(
      doc_for_node(text, Loc(start, text.len())),
      Some("Summary line.".to_string())
    );
  }

  #[test]
  fn ignores_plain_comments_and_separated_blocks() {
    let text = "/* not doc */\ninterface Foo {}";
    let start = text.find("interface").unwrap();
    assert_eq!(doc_for_node(text, Loc(start, text.len())), None);

    let text = "/** doc */\nlet x: string;\ninterface Foo {}";
    let start = text.find("interface").unwrap();
    assert_eq!(doc_for_node(text, Loc(start, text.len())), None);
  }

  #[test]
  fn file_level_fallback_picks_last_block() {
    let text = "/** File header. */\n/** Closest block. */\nimport {A} from 'a';\ninterface Foo {}";
    let start = text.find("interface").unwrap();
    assert_eq!(
      file_level_doc(text, start),
      Some("Closest block.".to_string())
    );
  }

  #[test]
  fn strips_star_gutters() {
    let block = "/**\n * Line one.\n * Line two.\n */";
    assert_eq!(clean_block(block), Some("Line one.\nLine two.".to_string()));
  }
}
