use super::*;

#[test]
fn no_bookmarks_is_empty() {
    assert_eq!(NoBookmarks.bookmark(Path::new("/a/b.mov")), "");
}

#[test]
fn missing_helper_yields_empty_token() {
    let helper = CommandBookmarks::new("/definitely/not/a/bookmark-helper");
    assert_eq!(helper.bookmark(Path::new("/a/b.mov")), "");
}

#[cfg(unix)]
#[test]
fn helper_stdout_is_the_token() {
    let helper = CommandBookmarks::new("echo").arg("token-for");
    assert_eq!(helper.bookmark(Path::new("/a/b.mov")), "token-for /a/b.mov");
}

#[cfg(unix)]
#[test]
fn failing_helper_yields_empty_token() {
    let helper = CommandBookmarks::new("false");
    assert_eq!(helper.bookmark(Path::new("/a/b.mov")), "");
}
