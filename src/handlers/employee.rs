use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::config::PageContext;
use crate::db::EmployeeStore;
use crate::errors::AppError;
use crate::handlers::html_page;
use crate::models::employee::Employee;
use crate::views;

#[derive(Deserialize)]
pub struct AddEmployeeForm {
    emp_id: String,
    first_name: String,
    last_name: String,
    primary_skill: String,
    location: String,
}

#[derive(Deserialize)]
pub struct LookupForm {
    emp_id: Option<String>,
}

pub async fn add_employee(
    ctx: web::Data<PageContext>,
    store: web::Data<dyn EmployeeStore>,
    form: web::Form<AddEmployeeForm>,
) -> Result<HttpResponse, actix_web::Error> {
    let form = form.into_inner();
    let employee = Employee {
        emp_id: form.emp_id,
        first_name: form.first_name,
        last_name: form.last_name,
        primary_skill: form.primary_skill,
        location: form.location,
    };

    store.insert(&employee).await.map_err(|err| {
        log::error!("employee insert failed: {err}");
        AppError::Database(err.to_string())
    })?;

    let name = format!("{} {}", employee.first_name, employee.last_name);
    Ok(html_page(views::employee_added_page(&ctx, &name)))
}

pub async fn fetch_employee(
    ctx: web::Data<PageContext>,
    store: web::Data<dyn EmployeeStore>,
    form: web::Form<LookupForm>,
) -> Result<HttpResponse, actix_web::Error> {
    // An absent or empty ID renders as "not found" rather than a 4xx.
    let Some(emp_id) = form.into_inner().emp_id.filter(|id| !id.is_empty()) else {
        return Ok(html_page(views::employee_not_found_page(&ctx)));
    };

    let employee = store.fetch(&emp_id).await.map_err(|err| {
        log::error!("employee fetch failed: {err}");
        AppError::Database(err.to_string())
    })?;

    match employee {
        Some(employee) => Ok(html_page(views::employee_details_page(&ctx, &employee))),
        None => Ok(html_page(views::employee_not_found_page(&ctx))),
    }
}
