use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Edit / activate-deactivate / delete buttons of one row.
///
/// All of them are disabled while `blocked` is true (a confirmation is open
/// or a mutation on this record is in flight).
#[component]
pub fn RowActions(
    is_active: bool,
    #[prop(into)] blocked: Signal<bool>,
    on_edit: Callback<()>,
    on_toggle_active: Callback<()>,
    on_delete: Callback<()>,
    /// Extra "configure" action (report fields of a lab test)
    #[prop(optional)]
    on_configure: Option<Callback<()>>,
) -> impl IntoView {
    let toggle_title = if is_active { "Deactivate" } else { "Activate" };

    view! {
        <Space>
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Subtle
                disabled=blocked
                on_click=move |_| on_edit.run(())
            >
                <span title="Edit">{icon("edit")}</span>
            </Button>
            {on_configure.map(|cb| view! {
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    disabled=blocked
                    on_click=move |_| cb.run(())
                >
                    <span title="Report fields">{icon("settings")}</span>
                </Button>
            })}
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Subtle
                disabled=blocked
                on_click=move |_| on_toggle_active.run(())
            >
                <span title=toggle_title>{icon("power")}</span>
            </Button>
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Subtle
                disabled=blocked
                on_click=move |_| on_delete.run(())
            >
                <span title="Delete">{icon("delete")}</span>
            </Button>
        </Space>
    }
}

/// Active/inactive badge
#[component]
pub fn StatusBadge(is_active: bool) -> impl IntoView {
    if is_active {
        view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Active"</Badge> }.into_any()
    } else {
        view! { <Badge appearance=BadgeAppearance::Outline color=BadgeColor::Subtle>"Inactive"</Badge> }
            .into_any()
    }
}
