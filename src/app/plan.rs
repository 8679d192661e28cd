use crate::args::TesterArgs;
use crate::error::AuthError;
use crate::http::{CallTimeouts, Credentials, SubmissionTemplate};
use crate::workload::WorkloadConfig;

use super::dispatch::DispatchPlan;
use super::poller::PollPlan;
use super::runner::RunPlan;

pub(super) fn run_plan(args: &TesterArgs) -> RunPlan {
    RunPlan {
        dispatch: DispatchPlan {
            concurrency: args.concurrency.get(),
            duration: args.duration,
            submit_interval: args.submit_interval,
            harvest_wait: args.harvest_wait,
        },
        poll: PollPlan {
            interval: args.poll_interval,
            timeout: args.poll_timeout,
            phase_timeout: args.poll_phase_timeout.unwrap_or(args.poll_timeout),
            parallelism: args.poll_parallelism.get(),
        },
    }
}

pub(super) const fn workload_config(args: &TesterArgs) -> WorkloadConfig {
    WorkloadConfig {
        seed: args.seed,
        users: args.users,
        weights: args.case_weights,
    }
}

pub(super) fn submission_template(args: &TesterArgs) -> SubmissionTemplate {
    SubmissionTemplate {
        problem_id: args.problem_id,
        test_input: if args.test_input.is_empty() {
            None
        } else {
            Some(args.test_input.clone())
        },
    }
}

pub(super) const fn call_timeouts(args: &TesterArgs) -> CallTimeouts {
    CallTimeouts {
        submit: args.submit_timeout,
        status: args.status_timeout,
    }
}

/// Authentication runs only when an email is configured.
pub(super) fn credentials(args: &TesterArgs) -> Result<Option<Credentials>, AuthError> {
    let Some(email) = args.email.as_ref() else {
        return Ok(None);
    };
    let password = args.password.as_ref().ok_or(AuthError::MissingPassword)?;
    Ok(Some(Credentials {
        email: email.clone(),
        password: password.clone(),
        username: args.register_username.clone(),
    }))
}
