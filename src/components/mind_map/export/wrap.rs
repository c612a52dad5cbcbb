use super::scene::FONT_SIZE;

/// Share of the node width a wrapped line may occupy.
pub const WRAP_RATIO: f64 = 0.9;

/// Width of a run of text in canvas units.
pub trait TextMeasure {
	fn text_width(&self, text: &str) -> f64;
}

/// Fixed per-character estimate, used where no font metrics exist (SVG).
#[derive(Clone, Copy, Debug)]
pub struct ApproxMeasure {
	pub char_width: f64,
}

impl Default for ApproxMeasure {
	fn default() -> Self {
		// average sans-serif glyph at the export font size
		Self {
			char_width: FONT_SIZE * 0.55,
		}
	}
}

impl TextMeasure for ApproxMeasure {
	fn text_width(&self, text: &str) -> f64 {
		text.chars().count() as f64 * self.char_width
	}
}

/// Greedy word wrap: words are appended while the line stays within
/// `max_width`, otherwise a new line starts. A single word wider than
/// `max_width` gets a line of its own.
pub fn wrap_label(label: &str, max_width: f64, measure: &impl TextMeasure) -> Vec<String> {
	let mut lines = Vec::new();
	let mut line = String::new();
	for word in label.split_whitespace() {
		if line.is_empty() {
			line.push_str(word);
			continue;
		}
		let candidate = format!("{} {}", line, word);
		if measure.text_width(&candidate) <= max_width {
			line = candidate;
		} else {
			lines.push(std::mem::replace(&mut line, word.to_string()));
		}
	}
	if !line.is_empty() {
		lines.push(line);
	}
	lines
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Mono;

	impl TextMeasure for Mono {
		fn text_width(&self, text: &str) -> f64 {
			text.len() as f64 * 10.0
		}
	}

	#[test]
	fn breaks_at_max_width() {
		assert_eq!(wrap_label("Central Idea", 90.0, &Mono), vec!["Central", "Idea"]);
		assert_eq!(wrap_label("Plan it", 90.0, &Mono), vec!["Plan it"]);
	}

	#[test]
	fn words_accumulate_until_width() {
		assert_eq!(
			wrap_label("a bb ccc dddd eeeee", 90.0, &Mono),
			vec!["a bb ccc", "dddd", "eeeee"]
		);
	}

	#[test]
	fn long_word_keeps_its_own_line() {
		assert_eq!(
			wrap_label("x extraordinarily y", 90.0, &Mono),
			vec!["x", "extraordinarily", "y"]
		);
	}

	#[test]
	fn whitespace_only_gives_no_lines() {
		assert!(wrap_label("   ", 90.0, &Mono).is_empty());
	}

	#[test]
	fn approx_measure_counts_chars() {
		let m = ApproxMeasure { char_width: 7.0 };
		assert_eq!(m.text_width("héllo"), 35.0);
	}
}
