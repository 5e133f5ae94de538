/// Strip ASCII punctuation and lowercase. Absent text normalizes to "".
pub fn normalize(text: Option<&str>) -> String {
    let Some(text) = text else { return String::new() };
    text.chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .to_lowercase()
}
