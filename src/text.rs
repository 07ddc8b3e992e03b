use regex::Regex;

/// Clean raw OCR output: strip trailing whitespace per line, collapse runs
/// of blank lines, and trim the whole block.
pub fn clean_ocr_text(text: &str) -> String {
    let re_trailing = Regex::new(r"[ \t]+\n").unwrap();
    let text = re_trailing.replace_all(text, "\n");

    let re_blank_runs = Regex::new(r"\n{3,}").unwrap();
    let text = re_blank_runs.replace_all(&text, "\n\n");

    text.trim().to_string()
}
