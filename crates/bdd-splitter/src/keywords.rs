//! Localised scenario keywords.
//!
//! `gherkin` keeps its keyword tables private, so the pairs needed to turn an
//! outline back into a plain scenario are listed here. Entries follow the
//! Cucumber `gherkin-languages.json` catalogue bundled with `gherkin` 0.14.

/// `(language, outline keyword, plain scenario keyword)`, English first.
static OUTLINE_KEYWORDS: &[(&str, &str, &str)] = &[
    ("en", "Scenario Outline", "Scenario"),
    ("en", "Scenario Template", "Scenario"),
    ("af", "Situasie Uiteensetting", "Situasie"),
    ("am", "Սցենարի կառուցվացքը", "Սցենար"),
    ("an", "Esquema del caso", "Caso"),
    ("ar", "سيناريو مخطط", "سيناريو"),
    ("ast", "Esbozu del casu", "Casu"),
    ("az", "Ssenarinin strukturu", "Ssenari"),
    ("bg", "Рамка на сценарий", "Сценарий"),
    ("bm", "Kerangka Senario", "Senario"),
    ("bm", "Kerangka Situasi", "Situasi"),
    ("bm", "Kerangka Keadaan", "Keadaan"),
    ("bm", "Garis Panduan Senario", "Senario"),
    ("bs", "Scenariju-obris", "Scenariju"),
    ("bs", "Scenario-outline", "Scenario"),
    ("ca", "Esquema de l'escenari", "Escenari"),
    ("cs", "Náčrt Scénáře", "Scénář"),
    ("cs", "Osnova scénáře", "Scénář"),
    ("cy-GB", "Scenario Amlinellol", "Scenario"),
    ("da", "Abstrakt Scenario", "Scenarie"),
    ("de", "Szenariogrundriss", "Szenario"),
    ("de", "Szenarien", "Szenario"),
    ("el", "Περιγραφή Σεναρίου", "Σενάριο"),
    ("el", "Περίγραμμα Σεναρίου", "Σενάριο"),
    ("em", "📖", "📕"),
    ("en-Scouse", "Wharrimean is", "The thing of it is"),
    ("en-au", "Reckon it's like", "Awww, look mate"),
    ("en-lol", "MISHUN SRSLY", "MISHUN"),
    ("en-old", "Swa hwaer swa", "Swa"),
    ("en-old", "Swa hwær swa", "Swa"),
    ("en-pirate", "Shiver me timbers", "Heave to"),
    ("en-tx", "Serious as a snake bite", "All hat and no cattle"),
    ("en-tx", "Busy as a hound in flea season", "All hat and no cattle"),
    ("eo", "Konturo de la scenaro", "Scenaro"),
    ("eo", "Skizo", "Kazo"),
    ("eo", "Kazo-skizo", "Kazo"),
    ("es", "Esquema del escenario", "Escenario"),
    ("et", "Raamjuhtum", "Juhtum"),
    ("et", "Raamstsenaarium", "Stsenaarium"),
    ("fa", "الگوی سناریو", "سناریو"),
    ("fi", "Tapausaihio", "Tapaus"),
    ("fr", "Plan du scénario", "Scénario"),
    ("fr", "Plan du Scénario", "Scénario"),
    ("ga", "Cás Achomair", "Cás"),
    ("gj", "પરિદ્દશ્ય રૂપરેખા", "સ્થિતિ"),
    ("gj", "પરિદ્દશ્ય ઢાંચો", "સ્થિતિ"),
    ("gl", "Esbozo do escenario", "Escenario"),
    ("he", "תבנית תרחיש", "תרחיש"),
    ("hi", "परिदृश्य रूपरेखा", "परिदृश्य"),
    ("hr", "Skica", "Scenarij"),
    ("hr", "Koncept", "Scenarij"),
    ("ht", "Plan senaryo", "Senaryo"),
    ("ht", "Plan Senaryo", "Senaryo"),
    ("ht", "Senaryo deskripsyon", "Senaryo"),
    ("ht", "Senaryo Deskripsyon", "Senaryo"),
    ("ht", "Dyagram senaryo", "Senaryo"),
    ("ht", "Dyagram Senaryo", "Senaryo"),
    ("hu", "Forgatókönyv vázlat", "Forgatókönyv"),
    ("id", "Skenario konsep", "Skenario"),
    ("id", "Garis-Besar Skenario", "Skenario"),
    ("is", "Lýsing Atburðarásar", "Atburðarás"),
    ("is", "Lýsing Dæma", "Atburðarás"),
    ("it", "Schema dello scenario", "Scenario"),
    ("ja", "シナリオアウトライン", "シナリオ"),
    ("ja", "シナリオテンプレート", "シナリオ"),
    ("ja", "テンプレ", "シナリオ"),
    ("ja", "シナリオテンプレ", "シナリオ"),
    ("jv", "Konsep skenario", "Skenario"),
    ("ka", "სცენარის ნიმუში", "სცენარის"),
    ("kn", "ವಿವರಣೆ", "ಕಥಾಸಾರಾಂಶ"),
    ("ko", "시나리오 개요", "시나리오"),
    ("lt", "Scenarijaus šablonas", "Scenarijus"),
    ("lu", "Plang vum Szenario", "Szenario"),
    ("lv", "Scenārijs pēc parauga", "Scenārijs"),
    ("mk-Cyrl", "Преглед на сценарија", "На пример"),
    ("mk-Cyrl", "Скица", "На пример"),
    ("mk-Cyrl", "Концепт", "На пример"),
    ("mk-Latn", "Pregled na scenarija", "Na primer"),
    ("mk-Latn", "Skica", "Na primer"),
    ("mk-Latn", "Koncept", "Na primer"),
    ("mn", "Сценарын төлөвлөгөө", "Сценар"),
    ("mr", "परिदृश्य रूपरेखा", "परिदृश्य"),
    ("ne", "परिदृश्य रूपरेखा", "परिदृश्य"),
    ("nl", "Abstract Scenario", "Scenario"),
    ("no", "Scenariomal", "Scenario"),
    ("no", "Abstrakt Scenario", "Scenario"),
    ("pa", "ਪਟਕਥਾ ਢਾਂਚਾ", "ਪਟਕਥਾ"),
    ("pa", "ਪਟਕਥਾ ਰੂਪ ਰੇਖਾ", "ਪਟਕਥਾ"),
    ("pl", "Szablon scenariusza", "Scenariusz"),
    ("pt", "Esquema do Cenário", "Cenário"),
    ("pt", "Esquema do Cenario", "Cenario"),
    ("pt", "Delineação do Cenário", "Cenário"),
    ("pt", "Delineacao do Cenario", "Cenario"),
    ("ro", "Structura scenariu", "Scenariu"),
    ("ro", "Structură scenariu", "Scenariu"),
    ("ru", "Структура сценария", "Сценарий"),
    ("ru", "Шаблон сценария", "Сценарий"),
    ("sk", "Náčrt Scenáru", "Scenár"),
    ("sk", "Náčrt Scenára", "Scenár"),
    ("sk", "Osnova Scenára", "Scenár"),
    ("sl", "Struktura scenarija", "Scenarij"),
    ("sl", "Skica", "Scenarij"),
    ("sl", "Koncept", "Scenarij"),
    ("sl", "Oris scenarija", "Scenarij"),
    ("sl", "Osnutek", "Scenarij"),
    ("sr-Cyrl", "Структура сценарија", "Пример"),
    ("sr-Cyrl", "Скица", "Пример"),
    ("sr-Cyrl", "Концепт", "Пример"),
    ("sr-Latn", "Struktura scenarija", "Primer"),
    ("sr-Latn", "Skica", "Primer"),
    ("sr-Latn", "Koncept", "Primer"),
    ("sv", "Abstrakt Scenario", "Scenario"),
    ("sv", "Scenariomall", "Scenario"),
    ("ta", "காட்சி சுருக்கம்", "காட்சி"),
    ("ta", "காட்சி வார்ப்புரு", "காட்சி"),
    ("te", "కథనం", "సన్నివేశం"),
    ("th", "สรุปเหตุการณ์", "เหตุการณ์"),
    ("th", "โครงสร้างของเหตุการณ์", "เหตุการณ์"),
    ("tlh", "lut chovnatlh", "lut"),
    ("tr", "Senaryo taslağı", "Senaryo"),
    ("tt", "Сценарийның төзелеше", "Сценарий"),
    ("uk", "Структура сценарію", "Сценарій"),
    ("ur", "منظر نامے کا خاکہ", "منظرنامہ"),
    ("uz", "Сценарий структураси", "Сценарий"),
    ("vi", "Khung tình huống", "Tình huống"),
    ("vi", "Khung kịch bản", "Kịch bản"),
    ("zh-CN", "场景大纲", "场景"),
    ("zh-CN", "剧本大纲", "剧本"),
    ("zh-TW", "場景大綱", "場景"),
    ("zh-TW", "劇本大綱", "劇本"),
];

/// Whether `keyword` introduces a scenario outline in any language.
///
/// # Examples
///
/// ```
/// use bdd_splitter::keywords::is_outline_keyword;
///
/// assert!(is_outline_keyword("Scenario Outline"));
/// assert!(is_outline_keyword("Plan du scénario"));
/// assert!(!is_outline_keyword("Scenario"));
/// ```
#[must_use]
pub fn is_outline_keyword(keyword: &str) -> bool {
    let keyword = keyword.trim();
    OUTLINE_KEYWORDS
        .iter()
        .any(|(_, outline, _)| *outline == keyword)
}

/// Keyword a scenario takes once its examples have been substituted away.
///
/// Outline keywords map to the plain scenario keyword of `language`, or of
/// the first language using that outline keyword when `language` is unset or
/// does not list it. Any other keyword is returned unchanged.
///
/// # Examples
///
/// ```
/// use bdd_splitter::keywords::plain_scenario_keyword;
///
/// assert_eq!(plain_scenario_keyword("Scenario Outline", None), "Scenario");
/// assert_eq!(plain_scenario_keyword("Plan du scénario", Some("fr")), "Scénario");
/// assert_eq!(plain_scenario_keyword("Example", None), "Example");
/// ```
#[must_use]
pub fn plain_scenario_keyword(keyword: &str, language: Option<&str>) -> String {
    let trimmed = keyword.trim();
    let matching = || {
        OUTLINE_KEYWORDS
            .iter()
            .filter(move |(_, outline, _)| *outline == trimmed)
    };
    language
        .and_then(|code| matching().find(|(lang, _, _)| *lang == code))
        .or_else(|| matching().next())
        .map_or_else(|| keyword.to_string(), |(_, _, plain)| (*plain).to_string())
}
