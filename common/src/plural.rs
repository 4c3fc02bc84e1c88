//! ロシア語の数詞による語形変化（「строка」の3形）

/// 語形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralForm {
    /// 1, 21, 101 ...
    One,
    /// 2-4, 22-24 ...
    Few,
    /// 0, 5-20, 25-30, 111-114 ...
    Many,
}

const ROW_WORDS: [(PluralForm, &str); 3] = [
    (PluralForm::One, "строка"),
    (PluralForm::Few, "строки"),
    (PluralForm::Many, "строк"),
];

impl PluralForm {
    pub fn for_count(n: u64) -> Self {
        let last = n % 10;
        let last_two = n % 100;

        if last == 1 && last_two != 11 {
            PluralForm::One
        } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
            PluralForm::Few
        } else {
            PluralForm::Many
        }
    }
}

/// 件数に合った「строка」の語形
pub fn row_word(n: u64) -> &'static str {
    let form = PluralForm::for_count(n);
    ROW_WORDS
        .iter()
        .find(|(f, _)| *f == form)
        .map(|(_, word)| *word)
        .unwrap_or("строк")
}
