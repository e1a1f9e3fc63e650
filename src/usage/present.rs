use crate::corpus::ResultRecord;

/// Renders each record as a block of lines followed by a blank separator.
///
/// Aligned records print one `lang: text` line per language, in the order the
/// corpus returned them; simple records print a single `txt:` line. Every
/// block ends with its `src:` line.
pub fn present(records: &[ResultRecord]) -> Vec<String> {
    let mut lines = Vec::new();

    for record in records {
        match record {
            ResultRecord::Aligned(r) => {
                for (lang, text) in &r.texts {
                    lines.push(format!("{lang}: {text}"));
                }
            }
            ResultRecord::Simple(r) => lines.push(format!("txt: {}", r.text)),
        }
        lines.push(format!("src: {}", record.source()));
        lines.push(String::new());
    }

    lines
}
