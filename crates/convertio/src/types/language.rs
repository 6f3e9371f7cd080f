//! OCR recognition languages.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr, VariantNames};

use super::ClosedSet;

/// Language codes accepted in OCR settings.
///
/// The more languages are requested, the slower the recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr, VariantNames)]
#[derive(EnumCount, EnumIter)]
#[derive(Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Language {
    /// Afrikaans
    #[strum(serialize = "afr")]
    Afrikaans,
    /// Albanian
    #[strum(serialize = "sqi")]
    Albanian,
    /// Arabic
    #[strum(serialize = "ara")]
    Arabic,
    /// Armenian Eastern
    #[strum(serialize = "arm_east")]
    ArmenianEastern,
    /// Armenian Western
    #[strum(serialize = "arm_west")]
    ArmenianWestern,
    /// Azeri Cyrillic
    #[strum(serialize = "aze_cyrl")]
    AzeriCyrillic,
    /// Azeri Latin
    #[strum(serialize = "aze")]
    AzeriLatin,
    /// Basque
    #[strum(serialize = "eus")]
    Basque,
    /// Belarusian
    #[strum(serialize = "bel")]
    Belarusian,
    /// Bulgarian
    #[strum(serialize = "bul")]
    Bulgarian,
    /// Catalan
    #[strum(serialize = "cat")]
    Catalan,
    /// Cebuano
    #[strum(serialize = "ceb")]
    Cebuano,
    /// Chinese Simplified
    #[strum(serialize = "chi_sim")]
    ChineseSimplified,
    /// Chinese Traditional
    #[strum(serialize = "chi_tra")]
    ChineseTraditional,
    /// Croatian
    #[strum(serialize = "hrv")]
    Croatian,
    /// Czech
    #[strum(serialize = "ces")]
    Czech,
    /// Danish
    #[strum(serialize = "dan")]
    Danish,
    /// Dutch
    #[strum(serialize = "dut")]
    Dutch,
    /// Dutch Belgian
    #[strum(serialize = "nld")]
    DutchBelgian,
    /// English
    #[strum(serialize = "eng")]
    English,
    /// Esperanto
    #[strum(serialize = "epo")]
    Esperanto,
    /// Estonian
    #[strum(serialize = "est")]
    Estonian,
    /// Fijian
    #[strum(serialize = "fij")]
    Fijian,
    /// Finnish
    #[strum(serialize = "fin")]
    Finnish,
    /// French
    #[strum(serialize = "fra")]
    French,
    /// Galician
    #[strum(serialize = "glg")]
    Galician,
    /// German
    #[strum(serialize = "deu")]
    German,
    /// Greek
    #[strum(serialize = "grk")]
    Greek,
    /// Hawaiian
    #[strum(serialize = "haw")]
    Hawaiian,
    /// Hebrew
    #[strum(serialize = "heb")]
    Hebrew,
    /// Hungarian
    #[strum(serialize = "hun")]
    Hungarian,
    /// Icelandic
    #[strum(serialize = "isl")]
    Icelandic,
    /// Indonesian
    #[strum(serialize = "ind")]
    Indonesian,
    /// Irish
    #[strum(serialize = "gle")]
    Irish,
    /// Italian
    #[strum(serialize = "ita")]
    Italian,
    /// Japanese
    #[strum(serialize = "jpn")]
    Japanese,
    /// Kazakh
    #[strum(serialize = "kaz")]
    Kazakh,
    /// Kirghiz
    #[strum(serialize = "kir")]
    Kirghiz,
    /// Kongo
    #[strum(serialize = "kon")]
    Kongo,
    /// Korean
    #[strum(serialize = "kor")]
    Korean,
    /// Kurdish
    #[strum(serialize = "kur")]
    Kurdish,
    /// Latin
    #[strum(serialize = "lat")]
    Latin,
    /// Latvian
    #[strum(serialize = "lav")]
    Latvian,
    /// Lithuanian
    #[strum(serialize = "lit")]
    Lithuanian,
    /// Macedonian
    #[strum(serialize = "mkd")]
    Macedonian,
    /// Malay Malaysian
    #[strum(serialize = "mal")]
    MalayMalaysian,
    /// Maltese
    #[strum(serialize = "mlt")]
    Maltese,
    /// Norwegian Bokmal
    #[strum(serialize = "nor")]
    NorwegianBokmal,
    /// Polish
    #[strum(serialize = "pol")]
    Polish,
    /// Portuguese
    #[strum(serialize = "por")]
    Portuguese,
    /// Portuguese Brazilian
    #[strum(serialize = "bra")]
    PortugueseBrazilian,
    /// Romanian
    #[strum(serialize = "ron")]
    Romanian,
    /// Russian
    #[strum(serialize = "rus")]
    Russian,
    /// Scottish
    #[strum(serialize = "sco")]
    Scottish,
    /// Serbian Cyrillic
    #[strum(serialize = "srp")]
    SerbianCyrillic,
    /// Serbian Latin
    #[strum(serialize = "srp_latn")]
    SerbianLatin,
    /// Slovak
    #[strum(serialize = "slk")]
    Slovak,
    /// Slovenian
    #[strum(serialize = "slv")]
    Slovenian,
    /// Somali
    #[strum(serialize = "som")]
    Somali,
    /// Spanish
    #[strum(serialize = "spa")]
    Spanish,
    /// Swahili
    #[strum(serialize = "swa")]
    Swahili,
    /// Swedish
    #[strum(serialize = "swe")]
    Swedish,
    /// Tagalog
    #[strum(serialize = "tgl")]
    Tagalog,
    /// Tahitian
    #[strum(serialize = "tah")]
    Tahitian,
    /// Tajik
    #[strum(serialize = "tgk")]
    Tajik,
    /// Tatar
    #[strum(serialize = "tat")]
    Tatar,
    /// Thai
    #[strum(serialize = "tha")]
    Thai,
    /// Turkish
    #[strum(serialize = "tur")]
    Turkish,
    /// Turkmen
    #[strum(serialize = "turk")]
    Turkmen,
    /// Uighur Cyrillic
    #[strum(serialize = "uig_cyr")]
    UighurCyrillic,
    /// Uighur Latin
    #[strum(serialize = "uig")]
    UighurLatin,
    /// Ukrainian
    #[strum(serialize = "ukr")]
    Ukrainian,
    /// Uzbek Cyrillic
    #[strum(serialize = "uzb_cyrl")]
    UzbekCyrillic,
    /// Uzbek Latin
    #[strum(serialize = "uzb")]
    UzbekLatin,
    /// Vietnamese
    #[strum(serialize = "vie")]
    Vietnamese,
    /// Welsh
    #[strum(serialize = "cym")]
    Welsh,
}

impl Language {
    /// Returns the service language code.
    pub fn code(&self) -> &'static str {
        (*self).into()
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse().map_err(|_| {
            format!(
                "unknown variant `{code}`, expected one of {}",
                Self::VARIANTS.join(", ")
            )
        })
    }
}

impl ClosedSet for Language {}
