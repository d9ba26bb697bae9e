use leptos::prelude::*;

use crate::shared::form_submit::FormSubmit;
use crate::system::auth::context::use_auth;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let submit = FormSubmit::new();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);

    let submit_for_login = submit.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get_untracked();
        let password_val = password.get_untracked();
        set_error_message.set(None);

        // успешный вход переключает AppShell на MainLayout
        submit_for_login.run(move || async move {
            if let Err(e) = auth.sign_in(username_val, password_val).await {
                set_error_message.set(Some(e));
            }
        });
    };

    let is_loading = submit.pending_signal();

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"ระบบคลังอุปกรณ์ไอที"</h1>
                <h2>"เข้าสู่ระบบ"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"ชื่อผู้ใช้"</label>
                        <input
                            type="text"
                            id="username"
                            placeholder="admin"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"รหัสผ่าน"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "กำลังเข้าสู่ระบบ..." } else { "เข้าสู่ระบบ" }}
                    </button>
                </form>

                <div class="login-info">
                    <p>"บัญชีทดลอง:"</p>
                    <p>"ผู้ดูแล: " <strong>"admin"</strong> " / ผู้ใช้: " <strong>"somchai"</strong></p>
                    <p>"รหัสผ่าน: " <strong>"password"</strong></p>
                </div>
            </div>
        </div>
    }
}
