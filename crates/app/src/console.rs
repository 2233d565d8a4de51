//! Line-oriented front end
//!
//! Two surfaces share one loop: the booking form (open to anyone) and the
//! admin dashboard (behind the passphrase gate).

use std::io::{self, Write};

use dawa_core::{AppointmentId, AppointmentStatus, Error, ServiceType, StatusFilter};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::state::AppState;
use crate::viewmodel::{AppointmentRow, AuthPanel, BookingForm, Dashboard};

const HELP: &str = "\
Booking:
  book                     book a session
Admin:
  login [PASSWORD]         open the dashboard
  logout
  search [TEXT]            filter by name or phone (empty clears)
  filter STATUS|All        filter by status
  list                     appointments, newest first
  week                     bookings per day for the next seven days
  stats                    totals
  status ID STATUS         change an appointment's status
  delete ID                delete an appointment (asks first)
Other:
  help
  quit";

pub struct Console<'a, R, W> {
    state: &'a AppState,
    lines: Lines<R>,
    out: W,
    form: BookingForm,
    dashboard: Dashboard,
    auth: AuthPanel,
}

impl<'a, R, W> Console<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(state: &'a AppState, input: R, out: W) -> Self {
        Self {
            state,
            lines: input.lines(),
            out,
            form: BookingForm::new(),
            dashboard: Dashboard::new(),
            auth: AuthPanel::default(),
        }
    }

    /// Run until `quit` or end of input
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "{} booking. Type 'help' for commands.",
            self.state.config.clinic.name
        )?;

        while let Some(raw) = self.prompt("> ").await? {
            let line = raw.trim_start();
            let (command, raw_rest) = match line.split_once(' ') {
                Some((command, rest)) => (command.trim_end(), rest),
                None => (line.trim_end(), ""),
            };
            let rest = raw_rest.trim();

            match command {
                "" => {}
                "help" => writeln!(self.out, "{}", HELP)?,
                "quit" | "exit" => break,
                "book" => self.book().await?,
                // Passphrases are compared exactly, spaces included
                "login" => self.login(raw_rest).await?,
                "logout" => {
                    self.auth.logout(self.state);
                    writeln!(self.out, "Logged out.")?;
                }
                "search" => {
                    self.dashboard.query.search = rest.to_string();
                    self.list().await?;
                }
                "filter" => match rest.parse::<StatusFilter>() {
                    Ok(filter) => {
                        self.dashboard.query.status = filter;
                        self.list().await?;
                    }
                    Err(e) => writeln!(self.out, "{}", e)?,
                },
                "list" => self.list().await?,
                "week" => self.week().await?,
                "stats" => self.stats().await?,
                "status" => self.change_status(rest).await?,
                "delete" => self.delete(rest).await?,
                other => writeln!(self.out, "Unknown command '{}'. Type 'help'.", other)?,
            }
        }

        Ok(())
    }

    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        self.lines.next_line().await
    }

    async fn book(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Full name: ").await? else {
            return Ok(());
        };
        let Some(phone) = self.prompt("Phone number: ").await? else {
            return Ok(());
        };
        let services: Vec<&str> = ServiceType::all().iter().map(|s| s.display_name()).collect();
        let Some(service) = self
            .prompt(&format!("Service [{}]: ", services.join(" | ")))
            .await?
        else {
            return Ok(());
        };
        let Some(date) = self.prompt("Preferred date (YYYY-MM-DD): ").await? else {
            return Ok(());
        };
        let Some(time) = self.prompt("Preferred time (HH:MM): ").await? else {
            return Ok(());
        };

        let service_type = if service.trim().is_empty() {
            ServiceType::default()
        } else {
            match service.parse::<ServiceType>() {
                Ok(s) => s,
                Err(e) => {
                    writeln!(self.out, "{}", e)?;
                    return Ok(());
                }
            }
        };

        self.form.request.client_name = name;
        self.form.request.phone_number = phone;
        self.form.request.service_type = service_type;
        self.form.request.appointment_date = date;
        self.form.request.appointment_time = time;

        writeln!(self.out, "Processing...")?;
        match self.form.submit(self.state).await {
            Ok(receipt) => writeln!(
                self.out,
                "Booking Confirmed! WhatsApp notification sent. Reference {}",
                receipt.appointment.id
            ),
            Err(_) => writeln!(
                self.out,
                "{}",
                self.form.error.as_deref().unwrap_or_default()
            ),
        }
    }

    async fn login(&mut self, passphrase: &str) -> io::Result<()> {
        let passphrase = if passphrase.is_empty() {
            match self.prompt("Password: ").await? {
                Some(p) => p,
                None => return Ok(()),
            }
        } else {
            passphrase.to_string()
        };

        match self.auth.login(self.state, &passphrase) {
            Ok(()) => writeln!(self.out, "Welcome to the management console."),
            Err(_) => writeln!(self.out, "{}", self.auth.error.as_deref().unwrap_or_default()),
        }
    }

    async fn list(&mut self) -> io::Result<()> {
        match self.dashboard.rows(self.state).await {
            Ok(rows) if rows.is_empty() => {
                writeln!(self.out, "No appointments found matching your criteria.")
            }
            Ok(rows) => {
                for row in &rows {
                    writeln!(self.out, "{}", format_row(row))?;
                }
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    async fn week(&mut self) -> io::Result<()> {
        match self.dashboard.week(self.state).await {
            Ok(days) => {
                for day in days {
                    writeln!(
                        self.out,
                        "{} {}  {}",
                        day.date.format("%a"),
                        day.date,
                        day.count
                    )?;
                }
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    async fn stats(&mut self) -> io::Result<()> {
        match self.dashboard.stats(self.state).await {
            Ok(stats) => writeln!(
                self.out,
                "Total Bookings: {}  Today: {}  Pending: {}",
                stats.total, stats.today, stats.pending
            ),
            Err(e) => self.report(e),
        }
    }

    async fn change_status(&mut self, args: &str) -> io::Result<()> {
        let Some((id, status)) = args.split_once(char::is_whitespace) else {
            return writeln!(self.out, "Usage: status ID STATUS");
        };
        let status = match status.parse::<AppointmentStatus>() {
            Ok(s) => s,
            Err(e) => return writeln!(self.out, "{}", e),
        };

        let id = AppointmentId::from(id);
        match self.dashboard.set_status(self.state, &id, status).await {
            Ok(()) => writeln!(self.out, "{} is now {}.", id, status),
            Err(e) => self.report(e),
        }
    }

    async fn delete(&mut self, id: &str) -> io::Result<()> {
        if id.is_empty() {
            return writeln!(self.out, "Usage: delete ID");
        }

        let id = AppointmentId::from(id);
        let pending = match self.dashboard.request_delete(self.state, &id).await {
            Ok(p) => p,
            Err(e) => return self.report(e),
        };

        let question = format!("{} ({}) [y/N] ", pending.prompt(), pending.client_name());
        let answer = self.prompt(&question).await?.unwrap_or_default();
        if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            match self.dashboard.confirm_delete(self.state, pending).await {
                Ok(()) => writeln!(self.out, "Deleted."),
                Err(e) => self.report(e),
            }
        } else {
            pending.cancel();
            writeln!(self.out, "Kept.")
        }
    }

    fn report(&mut self, err: Error) -> io::Result<()> {
        writeln!(self.out, "{}", err.user_message())
    }
}

fn format_row(row: &AppointmentRow) -> String {
    format!(
        "{} {:<20} {:<22} {:<14} {} {} {:<9} [{}]",
        row.icon,
        row.client_name,
        row.service,
        row.phone_number,
        row.date,
        row.time,
        row.status.display_name(),
        row.id
    )
}
