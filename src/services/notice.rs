//! # 일회성 알림(flash notice)
//!
//! 폼 제출이 성공하면 "User Ada Lovelace added." 같은 알림을 쿠키에 담아
//! 리다이렉트하고, 다음 페이지 요청에서 한 번 읽은 뒤 바로 지웁니다.
//! 서버 쪽에는 아무것도 저장하지 않습니다.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const NOTICE_COOKIE: &str = "notice";

/// 다음 페이지에 보여줄 알림을 쿠키로 남깁니다.
///
/// 쿠키 값에는 공백이나 따옴표를 그대로 넣을 수 없으므로 URL 인코딩합니다.
pub fn flash(jar: CookieJar, message: impl AsRef<str>) -> CookieJar {
    let value = urlencoding::encode(message.as_ref()).into_owned();
    jar.add(
        Cookie::build((NOTICE_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// 남아 있는 알림을 꺼내고 쿠키를 삭제합니다.
///
/// 디코딩할 수 없는 값이어도 쿠키는 지웁니다. 남겨 두면 매 페이지마다 다시 읽힙니다.
pub fn take(jar: CookieJar) -> (CookieJar, Option<String>) {
    let Some(cookie) = jar.get(NOTICE_COOKIE) else {
        return (jar, None);
    };

    let notice = urlencoding::decode(cookie.value())
        .ok()
        .map(|message| message.into_owned());

    (jar.remove(Cookie::build(NOTICE_COOKIE).path("/")), notice)
}
