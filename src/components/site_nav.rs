// src/components/site_nav.rs
use crate::url_state::Section;
use crate::utils::{current_year, scroll_to_top};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SiteNavProps {
    pub active: Section,
    pub on_navigate: Callback<Section>,
}

#[function_component(SiteNav)]
pub fn site_nav(props: &SiteNavProps) -> Html {
    let menu_open = use_state(|| false);

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    // Every nav click closes the mobile menu and routes in-page.
    let link_to = |section: Section| {
        let menu_open = menu_open.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(false);
            on_navigate.emit(section);
        })
    };

    let brand_class = classes!("brand", (props.active == Section::Home).then_some("active"));

    html! {
        <header class="site-header">
            <a class={brand_class} href="#home" onclick={link_to(Section::Home)}>
                {"High Altitude Property Management"}
            </a>
            <button
                class="nav-toggle"
                type="button"
                aria-controls="site-nav"
                aria-expanded={(*menu_open).to_string()}
                onclick={toggle_menu}
            >
                {"☰"}
            </button>
            <nav id="site-nav" class={classes!("site-nav", (*menu_open).then_some("open"))}>
                {for Section::ALL.iter().map(|section| {
                    let active = props.active == *section;
                    html! {
                        <a
                            class={classes!("nav-link", active.then_some("active"))}
                            href={format!("#{}", section.id())}
                            data-section={section.id()}
                            onclick={link_to(*section)}
                        >
                            {section.label()}
                        </a>
                    }
                })}
            </nav>
        </header>
    }
}

#[function_component(SiteFooter)]
pub fn site_footer() -> Html {
    let back_to_top = Callback::from(|e: MouseEvent| {
        e.prevent_default();
        scroll_to_top();
    });

    html! {
        <footer class="site-footer">
            <p>{format!("© {} High Altitude Property Management", current_year())}</p>
            <a id="back-to-top" href="#" onclick={back_to_top}>{"Back to top ↑"}</a>
        </footer>
    }
}
