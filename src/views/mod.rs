use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::config::PageContext;
use crate::models::employee::Employee;

fn stylesheet(ctx: &PageContext) -> String {
    let mut css = format!(
        "body {{ background-color: {}; font-family: sans-serif; margin: 0; }} \
         header {{ padding: 1.5rem 2rem; background-color: rgba(255, 255, 255, 0.75); }} \
         header h1 {{ margin: 0 0 0.25rem 0; }} \
         header p {{ margin: 0; font-style: italic; }} \
         nav {{ padding: 0.5rem 2rem; background-color: rgba(0, 0, 0, 0.1); }} \
         main {{ padding: 2rem; }} \
         form div {{ margin-bottom: 0.75rem; }} \
         label {{ display: inline-block; width: 8rem; }} \
         table td {{ padding: 0.25rem 0.75rem; background-color: rgba(255, 255, 255, 0.75); }}",
        ctx.color
    );
    if let Some(image) = &ctx.background_image {
        css.push_str(&format!(
            " body {{ background-image: url({image}); background-size: cover; }}"
        ));
    }
    css
}

fn layout(ctx: &PageContext, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(stylesheet(ctx))) }
            }
            body {
                header {
                    h1 { (ctx.group_name) }
                    p { (ctx.group_slogan) }
                }
                nav {
                    a href="/" { "Add Employee" }
                    " | "
                    a href="/getemp" { "Get Employee" }
                    " | "
                    a href="/about" { "About" }
                }
                main { (content) }
            }
        }
    }
}

pub fn add_employee_page(ctx: &PageContext) -> Markup {
    layout(
        ctx,
        "Add Employee",
        html! {
            h2 { "Add Employee" }
            form method="post" action="/addemp" {
                div {
                    label for="emp_id" { "Employee ID" }
                    input type="text" id="emp_id" name="emp_id";
                }
                div {
                    label for="first_name" { "First Name" }
                    input type="text" id="first_name" name="first_name";
                }
                div {
                    label for="last_name" { "Last Name" }
                    input type="text" id="last_name" name="last_name";
                }
                div {
                    label for="primary_skill" { "Primary Skill" }
                    input type="text" id="primary_skill" name="primary_skill";
                }
                div {
                    label for="location" { "Location" }
                    input type="text" id="location" name="location";
                }
                button type="submit" { "Add Employee" }
            }
        },
    )
}

pub fn about_page(ctx: &PageContext) -> Markup {
    layout(
        ctx,
        "About",
        html! {
            h2 { "About" }
            p {
                "A small employee directory run by " (ctx.group_name) "."
            }
            p { (ctx.group_slogan) }
        },
    )
}

pub fn employee_added_page(ctx: &PageContext, name: &str) -> Markup {
    layout(
        ctx,
        "Employee Added",
        html! {
            h2 { "Employee Added" }
            p {
                "Employee " strong { (name) } " was added successfully."
            }
            p { a href="/" { "Add another employee" } }
        },
    )
}

pub fn lookup_page(ctx: &PageContext) -> Markup {
    layout(
        ctx,
        "Get Employee Data",
        html! {
            h2 { "Get Employee Data" }
            form method="post" action="/fetchdata" {
                div {
                    label for="emp_id" { "Employee ID" }
                    input type="text" id="emp_id" name="emp_id";
                }
                button type="submit" { "Fetch" }
            }
        },
    )
}

pub fn employee_details_page(ctx: &PageContext, employee: &Employee) -> Markup {
    layout(
        ctx,
        "Employee Data",
        html! {
            h2 { "Employee Data" }
            table {
                tr { td { "Employee ID" } td { (employee.emp_id) } }
                tr { td { "First Name" } td { (employee.first_name) } }
                tr { td { "Last Name" } td { (employee.last_name) } }
                tr { td { "Primary Skill" } td { (employee.primary_skill) } }
                tr { td { "Location" } td { (employee.location) } }
            }
        },
    )
}

pub fn employee_not_found_page(ctx: &PageContext) -> Markup {
    layout(
        ctx,
        "Employee Not Found",
        html! {
            h2 { "Employee Not Found" }
            p { "No employee matches that ID." }
            p { a href="/getemp" { "Try another lookup" } }
        },
    )
}

/// Bare page used for error responses, where no theme context is available.
pub fn message_page(title: &str, message: &str) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body {
                h1 { (title) }
                p { (message) }
            }
        }
    }
}
