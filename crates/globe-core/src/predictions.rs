//! Fortune tables and the random selector.

use rand::Rng;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    #[default]
    Ru,
    En,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }

    /// Upper-case label shown on the language toggle.
    pub fn label(self) -> &'static str {
        match self {
            Lang::Ru => "RU",
            Lang::En => "EN",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ru" => Some(Lang::Ru),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Lang::Ru => Lang::En,
            Lang::En => Lang::Ru,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictionError {
    #[error("no prediction table for language {0:?}")]
    UnknownLanguage(String),
}

pub const PREDICTIONS_RU: &[&str] = &[
    "В новом году тебя ждёт приятный сюрприз",
    "Скоро исполнится то, о чём ты давно мечтаешь",
    "Удача уже стучится в твою дверь",
    "Впереди много тёплых встреч с друзьями",
    "Этот год принесёт тебе вдохновение",
    "Смелый шаг откроет новые возможности",
    "Тебя ждёт путешествие, которое запомнится надолго",
    "Кто-то очень скоро скажет тебе важные слова",
    "Твоя доброта вернётся к тебе вдвойне",
    "Звёзды советуют чаще улыбаться",
    "Старое желание наконец сбудется",
    "В доме будет тепло, уютно и весело",
    "Новое увлечение подарит много радости",
    "Год будет щедрым на хорошие новости",
    "Рядом окажутся именно те, кто нужен",
    "Не бойся перемен: они к лучшему",
    "Тебя ждёт финансовая удача",
    "Зимнее чудо случится совсем скоро",
    "Твой талант наконец заметят",
    "Спокойствие и гармония станут твоими спутниками",
    "Ты найдёшь ответ на давний вопрос",
    "Впереди много поводов для праздника",
    "Маленькое доброе дело изменит многое",
    "Загаданное под бой курантов сбудется",
];

pub const PREDICTIONS_EN: &[&str] = &[
    "A pleasant surprise is waiting for you this year",
    "Something you have long dreamed of will soon come true",
    "Luck is already knocking at your door",
    "Many warm gatherings with friends lie ahead",
    "This year will bring you inspiration",
    "A bold step will open new doors",
    "A journey you will remember for years awaits",
    "Someone will soon tell you something important",
    "Your kindness will come back to you twice over",
    "The stars advise you to smile more often",
    "An old wish will finally be granted",
    "Your home will be warm, cosy and full of laughter",
    "A new hobby will bring you plenty of joy",
    "The year will be generous with good news",
    "The right people will be by your side",
    "Do not fear change: it is for the better",
    "Financial luck is on its way",
    "A winter miracle will happen very soon",
    "Your talent will finally be noticed",
    "Calm and harmony will keep you company",
    "You will find the answer to a long-standing question",
    "Plenty of reasons to celebrate are ahead",
    "A small act of kindness will change a lot",
    "The wish you make at midnight will come true",
];

pub fn predictions(lang: Lang) -> &'static [&'static str] {
    match lang {
        Lang::Ru => PREDICTIONS_RU,
        Lang::En => PREDICTIONS_EN,
    }
}

/// Uniformly random fortune for `lang`.
pub fn select<R: Rng + ?Sized>(lang: Lang, rng: &mut R) -> &'static str {
    let table = predictions(lang);
    let index = (rng.gen::<f64>() * table.len() as f64).floor() as usize;
    table[index.min(table.len() - 1)]
}

pub fn select_by_code<R: Rng + ?Sized>(
    code: &str,
    rng: &mut R,
) -> Result<&'static str, PredictionError> {
    let lang =
        Lang::from_code(code).ok_or_else(|| PredictionError::UnknownLanguage(code.to_string()))?;
    Ok(select(lang, rng))
}
