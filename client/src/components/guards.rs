//! Route guards wrapping page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both guards read the shared `AuthState` through a memoized decision so a
//! page is only rebuilt when the decision itself changes, not on every auth
//! state update (e.g. progress writes).

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::components::navigation::Navigation;
use crate::state::auth::{AuthState, Guard, RouteKind};

fn guard_memo(kind: RouteKind) -> Memo<Guard> {
    let auth = expect_context::<RwSignal<AuthState>>();
    Memo::new(move |_| auth.with(|state| state.guard(kind)))
}

/// Renders children under the navigation bar for signed-in users; otherwise
/// redirects to `/login`. Renders nothing until the session check settles.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let decision = guard_memo(RouteKind::Protected);
    move || match decision.get() {
        Guard::Wait => ().into_any(),
        Guard::Render => view! {
            <Navigation/>
            <div class="page">{children()}</div>
        }
        .into_any(),
        Guard::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
    }
}

/// Renders children for signed-out users; signed-in users go to `/`.
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    let decision = guard_memo(RouteKind::Public);
    move || match decision.get() {
        Guard::Wait => ().into_any(),
        Guard::Render => children().into_any(),
        Guard::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
    }
}
