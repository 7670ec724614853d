//! 설정 패널 (분석 방식, 서버 주소, API 키)

use crate::api::Engine;
use leptos::prelude::*;

#[component]
pub fn SettingsPanel<FS, FC, FU>(
    engine: RwSignal<Engine>,
    api_key: Signal<Option<String>>,
    server_url: Signal<String>,
    on_save_api_key: FS,
    on_clear_api_key: FC,
    on_server_url: FU,
) -> impl IntoView
where
    FS: Fn(String) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static + Clone + Send + Sync,
    FU: Fn(String) + 'static + Clone + Send + Sync,
{
    let (key_input, set_key_input) = signal(String::new());
    let needs_server = move || engine.get() != Engine::Browser;

    view! {
        <div class="settings-panel">
            <div class="settings-grid">
                <div class="form-group">
                    <label for="engine">"분석 방식"</label>
                    <select
                        id="engine"
                        on:change=move |ev| {
                            if let Some(value) = Engine::from_value(&event_target_value(&ev)) {
                                engine.set(value);
                            }
                        }
                    >
                        {Engine::ALL.into_iter().map(|e| view! {
                            <option value=e.value() selected=move || engine.get() == e>
                                {e.label()}
                            </option>
                        }).collect_view()}
                    </select>
                </div>

                <Show when=needs_server>
                    <div class="form-group">
                        <label for="server-url">"서버 주소"</label>
                        <input
                            type="text"
                            id="server-url"
                            placeholder="같은 주소 (비워두면 현재 페이지)"
                            prop:value=move || server_url.get()
                            on:change={
                                let on_server_url = on_server_url.clone();
                                move |ev| on_server_url(event_target_value(&ev))
                            }
                        />
                    </div>
                </Show>

                <Show when=move || engine.get().uses_api_key()>
                    <div class="form-group">
                        <label for="api-key">"API Key (서버에 키가 없을 때 사용)"</label>
                        <input
                            type="password"
                            id="api-key"
                            placeholder=move || if api_key.get().is_some() { "저장됨" } else { "API Key를 입력..." }
                            prop:value=move || key_input.get()
                            on:input=move |ev| set_key_input.set(event_target_value(&ev))
                        />
                        <div class="api-actions">
                            <button
                                class="btn btn-primary btn-small"
                                disabled=move || key_input.get().trim().is_empty()
                                on:click={
                                    let on_save_api_key = on_save_api_key.clone();
                                    move |_| {
                                        on_save_api_key(key_input.get_untracked().trim().to_string());
                                        set_key_input.set(String::new());
                                    }
                                }
                            >
                                "저장"
                            </button>
                            <button
                                class="btn btn-tertiary btn-small"
                                disabled=move || api_key.get().is_none()
                                on:click={
                                    let on_clear_api_key = on_clear_api_key.clone();
                                    move |_| on_clear_api_key(())
                                }
                            >
                                "삭제"
                            </button>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
