//! Languages, the persisted language preference, and the translation
//! dictionary for the login screen.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::storage::KeyValueStore;

/// Local-storage key for the language preference.
pub const LANGUAGE_STORAGE_KEY: &str = "beacon_login_language";

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Is,
    No,
    Nl,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Is, Language::No, Language::Nl];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Is => "is",
            Language::No => "no",
            Language::Nl => "nl",
        }
    }

    /// Native-name label for the language picker.
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Is => "Íslenska",
            Language::No => "Norsk",
            Language::Nl => "Nederlands",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "is" => Some(Language::Is),
            "no" => Some(Language::No),
            "nl" => Some(Language::Nl),
            _ => None,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

/// Read the persisted language preference. Absent or unrecognized values map
/// to the default.
pub fn stored_language(store: &impl KeyValueStore) -> Language {
    store
        .get(LANGUAGE_STORAGE_KEY)
        .and_then(|code| Language::from_code(&code))
        .unwrap_or_default()
}

/// Persist the language preference. Write-through, no error path.
pub fn store_language(store: &impl KeyValueStore, language: Language) {
    store.set(LANGUAGE_STORAGE_KEY, language.code());
}

/// Resolve a dotted key against the dictionary for `language`.
///
/// Walks the nested tree one segment at a time; if any segment is missing or
/// the final value is not a string, the key itself is returned so untranslated
/// labels stay visible instead of blanking out.
pub fn translate(language: Language, key: &str) -> String {
    let mut current = &TRANSLATIONS[language.code()];
    for segment in key.split('.') {
        match current.get(segment) {
            Some(next) => current = next,
            None => return key.to_string(),
        }
    }
    match current.as_str() {
        Some(text) => text.to_string(),
        None => key.to_string(),
    }
}

static TRANSLATIONS: Lazy<Value> = Lazy::new(|| {
    json!({
        "en": {
            "app": {
                "title": "Beacon Login",
                "badge": "Early Access"
            },
            "login": {
                "title": "Sign in to continue with Beacon",
                "subtitle": "Enter your email and we will send you a secure magic link to access your account.",
                "label": "Email address",
                "placeholder": "you@beaconhq.dev",
                "action": "Send magic link",
                "actionSending": "Sending...",
                "verifyStatus": "Verifying magic link...",
                "sentStatus": "Magic link sent. Check your email to continue.",
                "errorSend": "Failed to send magic link.",
                "errorVerify": "Magic link verification failed.",
                "note": "This login is the gateway to Beacon Chat and the other Beacon tools.",
                "stepsTitle": "What happens next",
                "steps": {
                    "one": "Check your inbox for a secure login link.",
                    "two": "Open the link to verify your session.",
                    "three": "Continue into Beacon Chat and other tools."
                }
            }
        },
        "is": {
            "app": {
                "title": "Beacon Innskráning",
                "badge": "Early Access"
            },
            "login": {
                "title": "Skráðu þig inn til að halda áfram með Beacon",
                "subtitle": "Sláðu inn netfang og við sendum þér örugga töfratengingu.",
                "label": "Netfang",
                "placeholder": "you@beaconhq.dev",
                "action": "Senda töfratengingu",
                "actionSending": "Sendi...",
                "verifyStatus": "Staðfesti töfratengingu...",
                "sentStatus": "Töfratenging send. Athugaðu pósthólfið þitt.",
                "errorSend": "Mistókst að senda töfratengingu.",
                "errorVerify": "Staðfesting töfratengingar mistókst.",
                "note": "Þessi innskráning er hliðið að Beacon Chat og öðrum Beacon verkfærum.",
                "stepsTitle": "Hvað gerist næst",
                "steps": {
                    "one": "Athugaðu pósthólfið fyrir örugga innskráningartengingu.",
                    "two": "Opnaðu tenginguna til að staðfesta lotuna.",
                    "three": "Haltu áfram í Beacon Chat og önnur verkfæri."
                }
            }
        },
        "no": {
            "app": {
                "title": "Beacon Innlogging",
                "badge": "Tidlig Tilgang"
            },
            "login": {
                "title": "Logg inn for å fortsette med Beacon",
                "subtitle": "Skriv inn e-post, så sender vi en sikker magisk lenke.",
                "label": "E-postadresse",
                "placeholder": "you@beaconhq.dev",
                "action": "Send magisk lenke",
                "actionSending": "Sender...",
                "verifyStatus": "Verifiserer magisk lenke...",
                "sentStatus": "Magisk lenke sendt. Sjekk e-posten din.",
                "errorSend": "Kunne ikke sende magisk lenke.",
                "errorVerify": "Verifisering av magisk lenke feilet.",
                "note": "Denne innloggingen er inngangen til Beacon Chat og de andre Beacon-verktøyene.",
                "stepsTitle": "Hva skjer videre",
                "steps": {
                    "one": "Sjekk innboksen for en sikker innloggingslenke.",
                    "two": "Åpne lenken for å bekrefte økten.",
                    "three": "Fortsett inn i Beacon Chat og andre verktøy."
                }
            }
        },
        "nl": {
            "app": {
                "title": "Beacon Inloggen",
                "badge": "Early Access"
            },
            "login": {
                "title": "Log in om verder te gaan met Beacon",
                "subtitle": "Vul je e-mail in en we sturen je een veilige magic link.",
                "label": "E-mailadres",
                "placeholder": "you@beaconhq.dev",
                "action": "Stuur magic link",
                "actionSending": "Versturen...",
                "verifyStatus": "Magic link verifiëren...",
                "sentStatus": "Magic link verzonden. Check je e-mail.",
                "errorSend": "Magic link verzenden mislukt.",
                "errorVerify": "Magic link verificatie mislukt.",
                "note": "Deze login is de toegang tot Beacon Chat en de andere Beacon-tools.",
                "stepsTitle": "Wat gebeurt er hierna",
                "steps": {
                    "one": "Controleer je inbox voor de veilige loginlink.",
                    "two": "Open de link om je sessie te verifiëren.",
                    "three": "Ga verder naar Beacon Chat en andere tools."
                }
            }
        }
    })
});
