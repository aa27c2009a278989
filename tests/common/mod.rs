//! Shared fixtures for the integration tests.

/// A news page: masthead, navigation, the article, a sidebar and a footer.
pub const NEWS_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>City council approves new budget | The Daily Example</title>
    <meta name="author" content="Jane Reporter">
    <script>window.analytics = { page: "budget" };</script>
</head>
<body>
    <header class="masthead"><a href="/">The Daily Example</a></header>
    <nav>
        <a href="/">Home</a> <a href="/news">News</a> <a href="/sport">Sport</a>
    </nav>
    <main>
        <article>
            <h1>City council approves new budget</h1>
            <p>The city council voted on Monday night to approve a new budget, which raises
               spending on parks, libraries, and road repairs by four percent.</p>
            <!-- ad slot -->
            <p>Supporters said the plan was overdue, pointing to years of deferred
               maintenance, crowded branches, and potholes that never seemed to get fixed.</p>
            <p>Critics on the council argued that the increase, while modest, would be hard
               to sustain if tax revenue falls short of the projections again.</p>
            <p>The budget takes effect in July, and the first projects, including the
               resurfacing of <a href="/main-street">Main Street</a>, are expected to begin
               later this summer.</p>
            <ul>
                <li>Parks, libraries and <em>pools</em></li>
                <li>Road repairs</li>
            </ul>
            <p>Short closing line.</p>
        </article>
    </main>
    <aside class="sidebar">
        <ul><li><a href="/a">Related one</a></li><li><a href="/b">Related two</a></li></ul>
    </aside>
    <footer><p>Copyright 2026 The Daily Example</p></footer>
</body>
</html>"#;

/// Canonical HTML of the article in [`NEWS_PAGE`].
pub const NEWS_ARTICLE: &str = "<main><article>\
<h1>City council approves new budget</h1>\
<p>The city council voted on Monday night to approve a new budget, which raises spending on parks, libraries, and road repairs by four percent.</p>\
<p>Supporters said the plan was overdue, pointing to years of deferred maintenance, crowded branches, and potholes that never seemed to get fixed.</p>\
<p>Critics on the council argued that the increase, while modest, would be hard to sustain if tax revenue falls short of the projections again.</p>\
<p>The budget takes effect in July, and the first projects, including the resurfacing of Main Street, are expected to begin later this summer.</p>\
<ul><li>Parks, libraries and pools</li><li>Road repairs</li></ul>\
<p>Short closing line.</p>\
</article></main>";

/// A page made only of navigation.
pub const LINK_PAGE: &str = r#"<html><head><title>Site map</title></head><body>
    <div class="menu"><a href="/">Home</a> | <a href="/news">News</a> | <a href="/about">About</a></div>
    <ul>
        <li><a href="/one">First story</a></li>
        <li><a href="/two">Second story</a></li>
        <li><a href="/three">Third story</a></li>
    </ul>
    <div class="footer">Copyright</div>
</body></html>"#;
