use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::i18n::Language;

#[derive(Properties, PartialEq)]
pub struct LanguageSelectorProps {
    pub value: Language,
    pub on_change: Callback<Language>,
}

#[function_component(LanguageSelector)]
pub fn language_selector(props: &LanguageSelectorProps) -> Html {
    let on_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(language) = Language::from_code(&select.value()) {
                on_change.emit(language);
            }
        })
    };

    html! {
        <select class="language-select" onchange={on_change}>
            {
                Language::ALL.iter().map(|language| {
                    html! {
                        <option
                            key={language.code()}
                            value={language.code()}
                            selected={*language == props.value}
                        >
                            { language.label() }
                        </option>
                    }
                }).collect::<Html>()
            }
        </select>
    }
}
