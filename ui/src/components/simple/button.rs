use dioxus::prelude::*;

#[derive(Clone, PartialEq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
}

impl ButtonVariant {
    fn get_classes(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "nexus-btn",
            ButtonVariant::Secondary => "font-mono uppercase text-xs tracking-widest px-6 py-3 border border-white/10 text-gray-400 transition-all duration-200 hover:bg-white/5 hover:text-white cursor-pointer",
            ButtonVariant::Danger => "font-mono uppercase text-xs tracking-widest px-6 py-3 border border-red-500/50 text-red-400 transition-all duration-200 hover:bg-red-500/10 cursor-pointer",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct Props {
    children: Element,
    #[props(into)]
    onclick: EventHandler<MouseEvent>,
    #[props(optional, default)]
    variant: ButtonVariant,
    #[props(optional, default)]
    disabled: bool,
    /// Shows a spinner and blocks clicks while an action is in flight.
    #[props(optional, default)]
    loading: bool,
    #[props(optional, into)]
    class: String,
}

#[component]
pub fn Button(props: Props) -> Element {
    let variant_classes = props.variant.get_classes();
    let inert = props.disabled || props.loading;
    let disabled_classes = if inert {
        "opacity-30 cursor-not-allowed grayscale pointer-events-none"
    } else {
        ""
    };
    let additional_classes = props.class;

    rsx! {
        button {
            class: "{variant_classes} {disabled_classes} {additional_classes} rounded flex justify-center items-center gap-2",
            onclick: move |evt| {
                if !inert {
                    props.onclick.call(evt)
                }
            },
            disabled: inert,
            if props.loading {
                span { class: "animate-spin rounded-full h-4 w-4 border-t-2 border-b-2 border-current" }
            }
            {props.children}
        }
    }
}
