use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::state::AppContext;
use leptos::prelude::*;

#[component]
pub fn ApplicationBar() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let display_name = move || app_state.current_user.with(|u| u.as_ref().map(|u| u.name.clone()));

    view! {
        <header class="sticky top-0 z-40 bg-primary text-primary-foreground shadow-sm">
            <nav class="mx-auto flex h-14 w-full max-w-4xl items-center gap-1 px-4">
                <h1 class="flex-1 text-lg font-semibold">"燕雀便签"</h1>
                {move || match display_name() {
                    None => {
                        view! {
                            <Button
                                variant=ButtonVariant::OnPrimary
                                size=ButtonSize::Sm
                                on:click=move |_| app_state.show_register.set(true)
                            >
                                "注册"
                            </Button>
                            <Button
                                variant=ButtonVariant::OnPrimary
                                size=ButtonSize::Sm
                                on:click=move |_| app_state.show_login.set(true)
                            >
                                "登入"
                            </Button>
                        }
                            .into_any()
                    }
                    Some(name) => {
                        view! {
                            <Button
                                variant=ButtonVariant::OnPrimary
                                size=ButtonSize::Sm
                                on:click=move |_| app_state.show_edit_password.set(true)
                            >
                                "修改密码"
                            </Button>
                            <Button
                                variant=ButtonVariant::OnPrimary
                                size=ButtonSize::Sm
                                attr:title="登出"
                                on:click=move |_| app_state.logout()
                            >
                                {name}
                            </Button>
                        }
                            .into_any()
                    }
                }}
            </nav>
        </header>
    }
}
