//! Sidebar with the navigation menu

use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    label: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (href, label, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            label: "Masters",
            items: vec![
                ("/referrers", "Referrers", "referrers"),
                ("/staff", "Staff", "staff"),
                ("/lab-tests", "Lab tests", "lab-tests"),
            ],
        },
    ]
}

/// Whether `href` is the current page or one of its sub-pages
fn is_current(pathname: &str, href: &str) -> bool {
    pathname == href
        || pathname
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();

    view! {
        <nav class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                view! {
                    <div class="app-sidebar__group">
                        <div class="app-sidebar__group-label">{group.label}</div>
                        {group.items.into_iter().map(|(href, label, icon_name)| {
                            view! {
                                <A href=href>
                                    <div
                                        class="app-sidebar__item"
                                        class:app-sidebar__item--active=move || {
                                            location.pathname.with(|p| is_current(p, href))
                                        }
                                    >
                                        <div class="app-sidebar__item-content">
                                            {icon(icon_name)}
                                            <span>{label}</span>
                                        </div>
                                    </div>
                                </A>
                            }
                        }).collect_view()}
                    </div>
                }
            }).collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_current() {
        assert!(is_current("/staff", "/staff"));
        assert!(is_current("/lab-tests/42", "/lab-tests"));
        assert!(!is_current("/staffing", "/staff"));
        assert!(!is_current("/", "/referrers"));
    }

    #[test]
    fn test_menu_covers_every_screen() {
        let hrefs: Vec<&str> = get_menu_groups()
            .iter()
            .flat_map(|g| g.items.iter().map(|(href, _, _)| *href))
            .collect();
        assert_eq!(hrefs, vec!["/referrers", "/staff", "/lab-tests"]);
    }
}
