use crate::auth::{self, Feedback, RegistrationStatus};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Dialog, DialogBody, DialogDescription, DialogFooter,
    DialogHeader, DialogTitle, Input, Label, Spinner,
};
use crate::models::{NewPassword, NewUser, PasswordChangeRequest};
use crate::notify::{
    ErrorMessage, Snackbar, ALREADY_REGISTERED, PASSWORD_CHANGED, REGISTERED,
};
use crate::state::actions::BoardHost;
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn apply_feedback(app: AppState, feedback: Feedback, field: RwSignal<Option<&'static str>>) {
    match feedback {
        Feedback::Field(text) => field.set(Some(text)),
        Feedback::Dialog(message) => app.show_error(message),
        Feedback::Toast(snackbar) => app.show_snackbar(snackbar),
    }
}

#[component]
fn FieldError(#[prop(into)] text: Signal<Option<&'static str>>) -> impl IntoView {
    view! {
        <Show when=move || text.get().is_some()>
            <p class="text-xs text-destructive" role="alert">
                {move || text.get().unwrap_or_default()}
            </p>
        </Show>
    }
}

#[component]
fn SubmitButton(
    #[prop(into)] label: &'static str,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into, optional)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <Button size=ButtonSize::Sm attr:disabled=move || loading.get() || disabled.get()>
            <Show when=move || loading.get()>
                <Spinner />
            </Show>
            {label}
        </Button>
    }
}

/// A click on a form button that must not submit the form.
fn cancel_click(on_cancel: impl Fn() + Copy + 'static) -> impl Fn(web_sys::MouseEvent) + Copy {
    move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        on_cancel();
    }
}

#[component]
pub fn LoginDialog() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let wrong_pwd_text: RwSignal<Option<&'static str>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let handle_exit = move || {
        email.set(String::new());
        password.set(String::new());
        wrong_pwd_text.set(None);
        app_state.show_login.set(false);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let api_client = app_state.api_client.get_untracked();

        wrong_pwd_text.set(None);
        loading.set(true);

        spawn_local(async move {
            match api_client.login(&email_val, &password_val).await {
                Ok(user) => {
                    handle_exit();
                    app_state.login_succeeded(user);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "login failed");
                    apply_feedback(app_state, auth::login_failure(&e), wrong_pwd_text);
                }
            }
            loading.set(false);
        });
    };

    let invalid = Signal::derive(move || wrong_pwd_text.get().is_some());

    view! {
        <Dialog open=app_state.show_login on_close=move |_: ()| handle_exit()>
            <form class="flex flex-col gap-4" on:submit=on_submit>
                <DialogHeader>
                    <DialogTitle>"登入"</DialogTitle>
                </DialogHeader>

                <DialogBody>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="login-email">"邮箱"</Label>
                        <Input
                            id="login-email"
                            r#type="email"
                            autocomplete="username"
                            bind_value=email
                            invalid=invalid
                            required=true
                            autofocus=true
                        />
                    </div>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="login-password">"密码"</Label>
                        <Input
                            id="login-password"
                            r#type="password"
                            autocomplete="current-password"
                            bind_value=password
                            invalid=invalid
                            required=true
                        />
                        <FieldError text=wrong_pwd_text />
                    </div>
                </DialogBody>

                <DialogFooter>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        on:click=cancel_click(handle_exit)
                    >
                        "取消"
                    </Button>
                    <SubmitButton label="登入" loading=loading />
                </DialogFooter>
            </form>
        </Dialog>
    }
}

#[component]
pub fn RegisterDialog() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let email: RwSignal<String> = RwSignal::new(String::new());
    let name: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let status: RwSignal<RegistrationStatus> = RwSignal::new(RegistrationStatus::default());
    let resend_text: RwSignal<Option<&'static str>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let handle_exit = move || {
        email.set(String::new());
        name.set(String::new());
        password.set(String::new());
        status.set(RegistrationStatus::default());
        app_state.show_register.set(false);
    };

    let on_email_blur = move |_: web_sys::FocusEvent| {
        let email_val = email.get_untracked();
        if email_val.trim().is_empty() {
            status.set(RegistrationStatus::New);
            return;
        }
        let api_client = app_state.api_client.get_untracked();

        spawn_local(async move {
            match RegistrationStatus::from_lookup(api_client.is_verified(&email_val).await) {
                Ok(s) => status.set(s),
                Err(e) => {
                    tracing::warn!(error = %e, "registration lookup failed");
                    status.set(RegistrationStatus::New);
                    app_state.show_error(ErrorMessage::unexpected(&e));
                }
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() || !status.get_untracked().can_submit() {
            return;
        }

        let new_user = NewUser {
            email: email.get_untracked(),
            name: name.get_untracked(),
            password: password.get_untracked(),
        };
        let api_client = app_state.api_client.get_untracked();

        loading.set(true);
        spawn_local(async move {
            match api_client.register(&new_user).await {
                Ok(()) => {
                    tracing::info!(user = %new_user.email, "registered");
                    handle_exit();
                    app_state.show_snackbar(Snackbar::info(REGISTERED));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "registration failed");
                    app_state.show_error(ErrorMessage::unexpected(&e));
                }
            }
            loading.set(false);
        });
    };

    let on_resend = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let email_val = email.get_untracked();
        let api_client = app_state.api_client.get_untracked();

        resend_text.set(None);
        loading.set(true);
        spawn_local(async move {
            match api_client.resend_verify(&email_val).await {
                Ok(()) => handle_exit(),
                Err(e) => {
                    tracing::warn!(error = %e, "resend verification failed");
                    apply_feedback(app_state, auth::resend_failure(&e), resend_text);
                }
            }
            loading.set(false);
        });
    };

    let verified = Signal::derive(move || status.get() == RegistrationStatus::Verified);
    let unverified = move || status.get() == RegistrationStatus::Unverified;
    let email_text = Signal::derive(move || verified.get().then_some(ALREADY_REGISTERED));

    view! {
        <Dialog open=app_state.show_register on_close=move |_: ()| handle_exit()>
            <form class="flex flex-col gap-4" on:submit=on_submit>
                <DialogHeader>
                    <DialogTitle>"注册"</DialogTitle>
                </DialogHeader>

                <DialogBody>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="register-email">"邮箱"</Label>
                        <Input
                            id="register-email"
                            r#type="email"
                            autocomplete="email"
                            bind_value=email
                            invalid=verified
                            required=true
                            autofocus=true
                            on:blur=on_email_blur
                        />
                        <FieldError text=email_text />
                    </div>

                    <Show
                        when=unverified
                        fallback=move || {
                            view! {
                                <div class="flex flex-col gap-1.5">
                                    <Label html_for="register-name">"昵称"</Label>
                                    <Input id="register-name" bind_value=name disabled=verified />
                                </div>
                                <div class="flex flex-col gap-1.5">
                                    <Label html_for="register-password">"密码"</Label>
                                    <Input
                                        id="register-password"
                                        r#type="password"
                                        autocomplete="new-password"
                                        bind_value=password
                                        disabled=verified
                                    />
                                </div>
                            }
                        }
                    >
                        <DialogDescription>"该邮箱已注册但尚未激活。"</DialogDescription>
                        <Button
                            variant=ButtonVariant::Secondary
                            class="w-full"
                            attr:disabled=move || loading.get()
                            on:click=on_resend
                        >
                            "重新发送激活邮件"
                        </Button>
                        <FieldError text=resend_text />
                    </Show>
                </DialogBody>

                <DialogFooter>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        on:click=cancel_click(handle_exit)
                    >
                        "取消"
                    </Button>
                    <SubmitButton label="注册" loading=loading disabled=verified />
                </DialogFooter>
            </form>
        </Dialog>
    }
}

#[component]
pub fn EditPasswordDialog() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let password: RwSignal<String> = RwSignal::new(String::new());
    let new_password: RwSignal<String> = RwSignal::new(String::new());
    let confirm_password: RwSignal<String> = RwSignal::new(String::new());
    let wrong_pwd_text: RwSignal<Option<&'static str>> = RwSignal::new(None);
    let mismatch_text: RwSignal<Option<&'static str>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let handle_exit = move || {
        password.set(String::new());
        new_password.set(String::new());
        confirm_password.set(String::new());
        wrong_pwd_text.set(None);
        mismatch_text.set(None);
        app_state.show_edit_password.set(false);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        wrong_pwd_text.set(None);
        mismatch_text.set(None);

        let fields = NewPassword {
            password: password.get_untracked(),
            new_password: new_password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        if let Err(feedback) = auth::validate_new_password(&fields) {
            apply_feedback(app_state, feedback, mismatch_text);
            return;
        }

        let session_email = app_state
            .current_user
            .with_untracked(|u| u.as_ref().map(|u| u.email.clone()));
        let body = match auth::password_email(session_email.as_deref()) {
            Ok(email) => PasswordChangeRequest::new(email, fields),
            Err(feedback) => {
                apply_feedback(app_state, feedback, wrong_pwd_text);
                return;
            }
        };
        let api_client = app_state.api_client.get_untracked();

        loading.set(true);
        spawn_local(async move {
            match api_client.change_password(&body).await {
                Ok(()) => {
                    tracing::info!("password changed");
                    handle_exit();
                    app_state.show_snackbar(Snackbar::info(PASSWORD_CHANGED));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "password change failed");
                    apply_feedback(app_state, auth::password_failure(&e), wrong_pwd_text);
                }
            }
            loading.set(false);
        });
    };

    let wrong_pwd = Signal::derive(move || wrong_pwd_text.get().is_some());
    let mismatch = Signal::derive(move || mismatch_text.get().is_some());

    view! {
        <Dialog open=app_state.show_edit_password on_close=move |_: ()| handle_exit()>
            <form class="flex flex-col gap-4" on:submit=on_submit>
                <DialogHeader>
                    <DialogTitle>"修改密码"</DialogTitle>
                </DialogHeader>

                <DialogBody>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="old-password">"旧密码"</Label>
                        <Input
                            id="old-password"
                            r#type="password"
                            autocomplete="current-password"
                            bind_value=password
                            invalid=wrong_pwd
                            required=true
                            autofocus=true
                        />
                        <FieldError text=wrong_pwd_text />
                    </div>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="new-password">"新密码"</Label>
                        <Input
                            id="new-password"
                            r#type="password"
                            autocomplete="new-password"
                            bind_value=new_password
                            invalid=mismatch
                            required=true
                        />
                    </div>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="confirm-password">"再次输入新密码"</Label>
                        <Input
                            id="confirm-password"
                            r#type="password"
                            autocomplete="new-password"
                            bind_value=confirm_password
                            invalid=mismatch
                            required=true
                        />
                        <FieldError text=mismatch_text />
                    </div>
                </DialogBody>

                <DialogFooter>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        on:click=cancel_click(handle_exit)
                    >
                        "取消"
                    </Button>
                    <SubmitButton label="修改" loading=loading />
                </DialogFooter>
            </form>
        </Dialog>
    }
}
